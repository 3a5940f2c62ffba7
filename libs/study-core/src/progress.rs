//! Learner progress: experience points, visit streak, lessons and quizzes.

use crate::error::{Result, ScheduleError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// XP for grading a flashcard.
pub const REVIEW_XP: u32 = 5;
/// XP for marking a flashcard as learned.
pub const LEARNED_XP: u32 = 20;
/// XP for completing a lesson the first time.
pub const LESSON_XP: u32 = 50;
pub const XP_PER_LEVEL: u32 = 500;
/// Quiz percentage needed for a topic to count as mastered.
pub const MASTERY_PERCENTAGE: f64 = 80.0;

/// Latest quiz result for a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub date: DateTime<Utc>,
}

/// Overall learner progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub xp: u32,
    pub completed_lessons: Vec<String>,
    pub quiz_scores: BTreeMap<String, QuizScore>,
    pub streak: u32,
    pub last_visit: DateTime<Utc>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// Per-topic summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub lesson_completed: bool,
    pub quiz_taken: bool,
    pub quiz_score: f64,
    pub mastered: bool,
}

/// Level derived from total XP.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub level: u32,
    pub xp_in_level: u32,
    pub xp_to_next_level: u32,
    pub percent: f64,
}

impl Progress {
    /// Fresh progress for a learner first seen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            xp: 0,
            completed_lessons: Vec::new(),
            quiz_scores: BTreeMap::new(),
            streak: 0,
            last_visit: now,
            achievements: Vec::new(),
        }
    }

    /// Update the visit streak.
    ///
    /// Same day keeps the streak, the next day extends it, and any longer
    /// gap starts over at 1. Days are whole 24-hour periods since the last
    /// visit.
    pub fn record_visit(&mut self, now: DateTime<Utc>) {
        let days = (now - self.last_visit).num_days().abs();
        match days {
            0 => {}
            1 => self.streak += 1,
            _ => self.streak = 1,
        }
        self.last_visit = now;
    }

    pub fn add_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    /// Mark a lesson complete. Returns false if it already was.
    pub fn complete_lesson(&mut self, topic: &str) -> bool {
        if self.is_lesson_completed(topic) {
            return false;
        }
        self.completed_lessons.push(topic.to_string());
        self.add_xp(LESSON_XP);
        true
    }

    pub fn is_lesson_completed(&self, topic: &str) -> bool {
        self.completed_lessons.iter().any(|t| t == topic)
    }

    /// Record a quiz result, replacing any earlier one for the topic.
    ///
    /// Awards one XP per percentage point and returns the XP earned.
    pub fn save_quiz_score(
        &mut self,
        topic: &str,
        score: u32,
        total_questions: u32,
        now: DateTime<Utc>,
    ) -> Result<u32> {
        if total_questions == 0 {
            return Err(ScheduleError::InvalidQuizTotal);
        }
        if score > total_questions {
            return Err(ScheduleError::QuizScoreOutOfRange {
                score,
                total: total_questions,
            });
        }

        let percentage = score as f64 / total_questions as f64 * 100.0;
        let earned = percentage.round() as u32;

        self.quiz_scores.insert(
            topic.to_string(),
            QuizScore {
                score,
                total_questions,
                percentage,
                date: now,
            },
        );
        self.add_xp(earned);
        Ok(earned)
    }

    pub fn topic_progress(&self, topic: &str) -> TopicProgress {
        let lesson_completed = self.is_lesson_completed(topic);
        let quiz = self.quiz_scores.get(topic);
        let quiz_score = quiz.map(|q| q.percentage).unwrap_or(0.0);

        TopicProgress {
            lesson_completed,
            quiz_taken: quiz.is_some(),
            quiz_score,
            mastered: lesson_completed && quiz_score >= MASTERY_PERCENTAGE,
        }
    }

    /// Topics with a completed lesson and a passing quiz.
    pub fn mastered_topics(&self) -> Vec<&str> {
        self.quiz_scores
            .iter()
            .filter(|(topic, quiz)| {
                quiz.percentage >= MASTERY_PERCENTAGE && self.is_lesson_completed(topic)
            })
            .map(|(topic, _)| topic.as_str())
            .collect()
    }

    pub fn level(&self) -> Level {
        let xp_in_level = self.xp % XP_PER_LEVEL;
        Level {
            level: self.xp / XP_PER_LEVEL + 1,
            xp_in_level,
            xp_to_next_level: XP_PER_LEVEL,
            percent: xp_in_level as f64 / XP_PER_LEVEL as f64 * 100.0,
        }
    }
}
