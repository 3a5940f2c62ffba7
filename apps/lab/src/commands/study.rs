//! Flashcard study commands.

use super::{write_json, OutputFormat};
use crate::db::KeyValueStore;
use crate::state::LabState;
use chrono::{DateTime, Utc};
use std::io::Write;
use study_core::{Quality, ReviewItem, StatusFilter};

/// List cards due for review.
pub fn due<S: KeyValueStore>(
    state: &LabState<S>,
    now: DateTime<Utc>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    list(state, StatusFilter::Due, now, format, out)
}

/// List cards matching a status filter.
pub fn list<S: KeyValueStore>(
    state: &LabState<S>,
    filter: StatusFilter,
    now: DateTime<Utc>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let cards = state.cards(filter, now);
    match format {
        OutputFormat::Json => write_json(out, &cards)?,
        OutputFormat::Text => {
            match state.counts(now).get(filter) {
                0 => writeln!(out, "No {} cards.", filter.as_str())?,
                1 => writeln!(out, "1 {} card:", filter.as_str())?,
                n => writeln!(out, "{n} {} cards:", filter.as_str())?,
            }
            for card in cards {
                write_card_line(out, card)?;
            }
        }
    }
    Ok(())
}

/// Grade a card with a 0-5 recall quality.
pub fn review<S: KeyValueStore>(
    state: &mut LabState<S>,
    card_id: i64,
    quality: u8,
    now: DateTime<Utc>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let quality = Quality::new(quality)?;
    let card = state.review_card(card_id, quality, now)?;
    write_result(out, &card, format)
}

pub fn mark_hard<S: KeyValueStore>(
    state: &mut LabState<S>,
    card_id: i64,
    now: DateTime<Utc>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let card = state.mark_hard(card_id, now)?;
    write_result(out, &card, format)
}

pub fn mark_learned<S: KeyValueStore>(
    state: &mut LabState<S>,
    card_id: i64,
    now: DateTime<Utc>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let card = state.mark_learned(card_id, now)?;
    write_result(out, &card, format)
}

fn write_result(out: &mut impl Write, card: &ReviewItem, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, card),
        OutputFormat::Text => {
            let next = card
                .next_review_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "now".to_string());
            writeln!(
                out,
                "Card {} is now {} (interval {}d, ease {:.2}); next review {}",
                card.id,
                card.status.as_str(),
                card.interval,
                card.ease_factor,
                next
            )?;
            Ok(())
        }
    }
}

fn write_card_line(out: &mut impl Write, card: &ReviewItem) -> std::io::Result<()> {
    writeln!(
        out,
        "{:>4}  {:<9} {:<16} {}",
        card.id,
        card.status.as_str(),
        card.topic,
        card.front
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::TimeZone;
    use study_core::CardContent;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap()
    }

    fn state() -> LabState<MemoryStore> {
        let catalog = vec![
            CardContent {
                id: 1,
                topic: "lists".to_string(),
                front: "How do you append?".to_string(),
                back: "list.append(x)".to_string(),
            },
            CardContent {
                id: 2,
                topic: "loops".to_string(),
                front: "What does break do?".to_string(),
                back: "Exits the loop.".to_string(),
            },
        ];
        LabState::load(MemoryStore::new(), catalog, now()).unwrap()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn review_reports_new_schedule() {
        let mut state = state();
        let mut buf: Vec<u8> = Vec::new();
        review(&mut state, 1, 4, now(), OutputFormat::Text, &mut buf).unwrap();
        let text = output(buf);
        assert!(text.contains("Card 1 is now learning"), "{text}");
        assert!(text.contains("next review 2024-06-02 07:00"), "{text}");
    }

    #[test]
    fn review_rejects_quality_above_five() {
        let mut state = state();
        let mut buf: Vec<u8> = Vec::new();
        let err = review(&mut state, 1, 7, now(), OutputFormat::Text, &mut buf).unwrap_err();
        assert!(err.to_string().contains("between 0 and 5"));
        assert_eq!(state.card(1).unwrap().repetitions, 0);
    }

    #[test]
    fn due_lists_unreviewed_cards_as_json() {
        let mut state = state();
        mark_learned(&mut state, 2, now(), OutputFormat::Text, &mut Vec::<u8>::new()).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        due(&state, now(), OutputFormat::Json, &mut buf).unwrap();
        let cards: Vec<ReviewItem> = serde_json::from_str(&output(buf)).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, 1);
    }

    #[test]
    fn list_header_reports_filter_count() {
        let mut state = state();
        mark_hard(&mut state, 2, now(), OutputFormat::Text, &mut Vec::<u8>::new()).unwrap();

        let mut buf: Vec<u8> = Vec::new();
        list(&state, StatusFilter::All, now(), OutputFormat::Text, &mut buf).unwrap();
        let text = output(buf);
        assert_eq!(text.lines().next(), Some("2 all cards:"));
        assert_eq!(text.lines().count(), 3);

        let mut buf: Vec<u8> = Vec::new();
        list(&state, StatusFilter::Hard, now(), OutputFormat::Text, &mut buf).unwrap();
        let text = output(buf);
        assert_eq!(text.lines().next(), Some("1 hard card:"));
        assert!(text.contains("What does break do?"));
    }

    #[test]
    fn empty_filter_says_so() {
        let state = state();
        let mut buf: Vec<u8> = Vec::new();
        list(&state, StatusFilter::Hard, now(), OutputFormat::Text, &mut buf).unwrap();
        assert_eq!(output(buf), "No hard cards.\n");
    }
}
