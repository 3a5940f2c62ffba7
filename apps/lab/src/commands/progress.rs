//! Progress commands: lessons, quizzes, statistics.

use super::{write_json, OutputFormat};
use crate::db::KeyValueStore;
use crate::state::LabState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use study_core::{Level, StatusCounts};

/// Dashboard summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats<'a> {
    pub xp: u32,
    pub level: Level,
    pub streak: u32,
    pub completed_lessons: &'a [String],
    pub mastered_topics: Vec<&'a str>,
    pub flashcards: StatusCounts,
}

pub fn complete_lesson<S: KeyValueStore>(
    state: &mut LabState<S>,
    topic: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if state.complete_lesson(topic) {
        writeln!(out, "Completed lesson '{topic}'.")?;
    } else {
        writeln!(out, "Lesson '{topic}' was already complete.")?;
    }
    Ok(())
}

pub fn save_quiz<S: KeyValueStore>(
    state: &mut LabState<S>,
    topic: &str,
    score: u32,
    total: u32,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let earned = state.save_quiz_score(topic, score, total, now)?;
    writeln!(out, "Quiz '{topic}': {score}/{total}, earned {earned} XP.")?;
    Ok(())
}

pub fn stats<S: KeyValueStore>(
    state: &LabState<S>,
    now: DateTime<Utc>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let progress = state.progress();
    let stats = Stats {
        xp: progress.xp,
        level: progress.level(),
        streak: progress.streak,
        completed_lessons: &progress.completed_lessons,
        mastered_topics: progress.mastered_topics(),
        flashcards: state.counts(now),
    };

    match format {
        OutputFormat::Json => write_json(out, &stats)?,
        OutputFormat::Text => {
            writeln!(
                out,
                "Level {} ({}/{} XP), {} XP total",
                stats.level.level, stats.level.xp_in_level, stats.level.xp_to_next_level, stats.xp
            )?;
            writeln!(out, "Streak: {} day(s)", stats.streak)?;
            writeln!(out, "Lessons done: {}", stats.completed_lessons.len())?;
            if !stats.mastered_topics.is_empty() {
                writeln!(out, "Mastered: {}", stats.mastered_topics.join(", "))?;
            }
            let cards = &stats.flashcards;
            writeln!(
                out,
                "Flashcards: {} total, {} due, {} new, {} learning, {} hard, {} learned",
                cards.total, cards.due, cards.new, cards.learning, cards.hard, cards.learned
            )?;
        }
    }
    Ok(())
}

pub fn reset<S: KeyValueStore>(
    state: &mut LabState<S>,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    state.reset(now);
    writeln!(out, "Progress reset.")?;
    Ok(())
}
