//! End-to-end study flow over a persistent store.

use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::Parser;
use fundamentals_lab::db::{keys, DbError, KeyValueStore, SqliteStore};
use fundamentals_lab::state::LabState;
use fundamentals_lab::{catalog, execute, Cli};
use pretty_assertions::assert_eq;
use study_core::algorithm::sm2::MAX_INTERVAL_DAYS;
use study_core::{CardContent, Progress, Quality, ReviewItem, ReviewStatus};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap()
}

fn run_command<S: KeyValueStore>(state: &mut LabState<S>, args: &[&str], now: DateTime<Utc>) -> String {
    let cli = Cli::try_parse_from(std::iter::once("lab").chain(args.iter().copied())).unwrap();
    let mut out: Vec<u8> = Vec::new();
    execute(state, cli.command, cli.format, now, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Store whose writes always fail.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get_raw(&self, _key: &str) -> Result<Option<String>, DbError> {
        Ok(None)
    }

    fn put_raw(&self, _key: &str, _value: &str) -> Result<(), DbError> {
        Err(DbError::InvalidData("read-only".to_string()))
    }

    fn delete_raw(&self, _key: &str) -> Result<(), DbError> {
        Err(DbError::InvalidData("read-only".to_string()))
    }
}

#[test]
fn review_schedule_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.db");
    let t = start();

    {
        let store = SqliteStore::open(&path).unwrap();
        let mut state = LabState::load(store, catalog::builtin().unwrap(), t).unwrap();
        state.review_card(1, Quality::new(4).unwrap(), t).unwrap();
        state
            .review_card(1, Quality::new(4).unwrap(), t + Duration::days(1))
            .unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    let state = LabState::load(store, catalog::builtin().unwrap(), t).unwrap();
    let card = state.card(1).unwrap();
    assert_eq!(card.repetitions, 2);
    assert_eq!(card.interval, 6);
    assert_eq!(card.status, ReviewStatus::Learning);
    assert_eq!(card.next_review_at, Some(t + Duration::days(7)));
    assert_eq!(state.progress().xp, 10);
}

#[test]
fn cli_walkthrough() {
    let store = SqliteStore::open_in_memory().unwrap();
    let t = start();
    let mut state = LabState::load(store, catalog::builtin().unwrap(), t).unwrap();
    let total = state.flashcards().len();

    let due = run_command(&mut state, &["due"], t);
    assert_eq!(due.lines().next(), Some(format!("{total} due cards:").as_str()));
    assert_eq!(due.lines().count(), total + 1);

    run_command(&mut state, &["review", "1", "5"], t);
    run_command(&mut state, &["hard", "2"], t);
    run_command(&mut state, &["learned", "3"], t);

    let hard = run_command(&mut state, &["list", "--status", "hard"], t);
    assert_eq!(hard.lines().count(), 2);
    assert!(hard.contains("hard"));

    // Nothing reviewed is due again until tomorrow.
    let due = run_command(&mut state, &["--format", "json", "due"], t);
    let cards: Vec<ReviewItem> = serde_json::from_str(&due).unwrap();
    assert_eq!(cards.len(), total - 3);

    let tomorrow = run_command(&mut state, &["--format", "json", "due"], t + Duration::days(1));
    let cards: Vec<ReviewItem> = serde_json::from_str(&tomorrow).unwrap();
    assert_eq!(cards.len(), total - 1);

    let stats = run_command(&mut state, &["stats"], t);
    assert!(stats.contains("1 hard, 1 learned"), "{stats}");
}

#[test]
fn repeated_early_reviews_keep_interval_bounded() {
    let store = SqliteStore::open_in_memory().unwrap();
    let t = start();
    let mut state = LabState::load(store, catalog::builtin().unwrap(), t).unwrap();

    for _ in 0..40 {
        run_command(&mut state, &["review", "1", "5"], t);
    }

    let card = state.card(1).unwrap();
    assert_eq!(card.repetitions, 40);
    assert_eq!(card.interval, MAX_INTERVAL_DAYS);
    assert_eq!(card.next_review_at, Some(t + Duration::days(MAX_INTERVAL_DAYS as i64)));
}

#[test]
fn reset_requires_confirmation() {
    let store = SqliteStore::open_in_memory().unwrap();
    let t = start();
    let mut state = LabState::load(store, catalog::builtin().unwrap(), t).unwrap();
    state.mark_learned(1, t).unwrap();

    let cli = Cli::try_parse_from(["lab", "reset"]).unwrap();
    let mut out: Vec<u8> = Vec::new();
    assert!(execute(&mut state, cli.command, cli.format, t, &mut out).is_err());
    assert_eq!(state.card(1).unwrap().status, ReviewStatus::Learned);

    run_command(&mut state, &["reset", "--yes"], t);
    assert_eq!(state.card(1).unwrap().status, ReviewStatus::New);
}

#[test]
fn unknown_status_filter_rejected_by_parser() {
    assert!(Cli::try_parse_from(["lab", "list", "--status", "mastered"]).is_err());
}

#[test]
fn saved_cards_keep_state_and_gain_new_catalog_entries() {
    let store = SqliteStore::open_in_memory().unwrap();
    let t = start();
    let reviewed = ReviewItem {
        id: 1,
        topic: "variables".to_string(),
        front: "What is a variable?".to_string(),
        back: "A name for a value.".to_string(),
        ease_factor: 2.7,
        interval: 15,
        repetitions: 3,
        next_review_at: Some(t + Duration::days(15)),
        last_reviewed_at: Some(t),
        status: ReviewStatus::Learning,
    };
    assert!(store.save(keys::FLASHCARDS, &vec![reviewed.clone()]));

    let catalog = vec![
        reviewed.content(),
        CardContent {
            id: 2,
            topic: "loops".to_string(),
            front: "What does continue do?".to_string(),
            back: "Skips to the next iteration.".to_string(),
        },
    ];
    let state = LabState::load(store, catalog, t).unwrap();
    assert_eq!(state.flashcards().len(), 2);
    assert_eq!(state.card(1), Some(&reviewed));
    assert_eq!(state.card(2).unwrap().status, ReviewStatus::New);
}

#[test]
fn corrupt_progress_falls_back_to_defaults() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.put_raw(keys::PROGRESS, "not json at all").unwrap();
    let t = start();
    let state = LabState::load(store, catalog::builtin().unwrap(), t).unwrap();
    assert_eq!(state.progress(), &Progress::new(t));
    assert!(state.store().load::<Progress>(keys::PROGRESS).is_some());
}

#[test]
fn failed_writes_do_not_interrupt_study() {
    let t = start();
    let mut state = LabState::load(ReadOnlyStore, catalog::builtin().unwrap(), t).unwrap();
    assert!(!state.persist());

    let card = state.review_card(1, Quality::new(3).unwrap(), t).unwrap();
    assert_eq!(card.status, ReviewStatus::Learning);
    assert_eq!(state.card(1), Some(&card));
    assert!(!state.store().clear_all());
}
