fn main() -> anyhow::Result<()> {
    fundamentals_lab::run()
}
