//! Application state: flashcards and progress loaded from a store.

use crate::db::{keys, KeyValueStore};
use crate::error::{LabError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use study_core::algorithm::{get_algorithm, SpacedRepetitionAlgorithm};
use study_core::progress::{LEARNED_XP, REVIEW_XP};
use study_core::queue::{filter_by_status, select_due, StatusCounts};
use study_core::{CardContent, Progress, Quality, ReviewItem, StatusFilter};

/// Learner state backed by a key/value store.
///
/// Every mutation replaces a single entry in memory and then writes the
/// affected collection back to the store.
pub struct LabState<S> {
    store: S,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    catalog: Vec<CardContent>,
    flashcards: Vec<ReviewItem>,
    progress: Progress,
}

impl<S: KeyValueStore> LabState<S> {
    /// Load state with the default SM-2 scheduler.
    pub fn load(store: S, catalog: Vec<CardContent>, now: DateTime<Utc>) -> Result<Self> {
        Self::load_with_algorithm(store, "sm2", catalog, now)
    }

    pub fn load_with_algorithm(
        store: S,
        algorithm: &str,
        catalog: Vec<CardContent>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let algorithm =
            get_algorithm(algorithm).ok_or_else(|| LabError::UnknownAlgorithm(algorithm.into()))?;

        let progress = store.load_or(keys::PROGRESS, Progress::new(now));
        let flashcards = match store.load::<Vec<ReviewItem>>(keys::FLASHCARDS) {
            Some(mut saved) => {
                let known: HashSet<i64> = saved.iter().map(|card| card.id).collect();
                let added: Vec<ReviewItem> = catalog
                    .iter()
                    .filter(|content| !known.contains(&content.id))
                    .map(|content| algorithm.initialize(content.clone(), now))
                    .collect();
                if !added.is_empty() {
                    tracing::info!(count = added.len(), "adding new catalog cards");
                }
                saved.extend(added);
                saved
            }
            None => {
                tracing::info!(count = catalog.len(), "initializing flashcards from catalog");
                Self::initial_cards(algorithm.as_ref(), &catalog, now)
            }
        };

        let state = Self {
            store,
            algorithm,
            catalog,
            flashcards,
            progress,
        };
        state.persist();
        Ok(state)
    }

    fn initial_cards(
        algorithm: &dyn SpacedRepetitionAlgorithm,
        catalog: &[CardContent],
        now: DateTime<Utc>,
    ) -> Vec<ReviewItem> {
        catalog
            .iter()
            .map(|content| algorithm.initialize(content.clone(), now))
            .collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn flashcards(&self) -> &[ReviewItem] {
        &self.flashcards
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn card(&self, id: i64) -> Option<&ReviewItem> {
        self.flashcards.iter().find(|card| card.id == id)
    }

    pub fn due(&self, now: DateTime<Utc>) -> Vec<&ReviewItem> {
        select_due(&self.flashcards, now)
    }

    pub fn cards(&self, filter: StatusFilter, now: DateTime<Utc>) -> Vec<&ReviewItem> {
        filter_by_status(&self.flashcards, filter, now)
    }

    pub fn counts(&self, now: DateTime<Utc>) -> StatusCounts {
        StatusCounts::tally(&self.flashcards, now)
    }

    /// Grade a card and award review XP.
    pub fn review_card(&mut self, id: i64, quality: Quality, now: DateTime<Utc>) -> Result<ReviewItem> {
        let algorithm = self.algorithm.as_ref();
        let updated = Self::replace_card(&mut self.flashcards, id, |card| {
            algorithm.review(card, quality, now).map_err(Into::into)
        })?;
        tracing::info!(
            card_id = id,
            quality = quality.value(),
            status = updated.status.as_str(),
            interval = updated.interval,
            "reviewed card"
        );
        self.progress.add_xp(REVIEW_XP);
        self.persist();
        Ok(updated)
    }

    pub fn mark_hard(&mut self, id: i64, now: DateTime<Utc>) -> Result<ReviewItem> {
        let algorithm = self.algorithm.as_ref();
        let updated =
            Self::replace_card(&mut self.flashcards, id, |card| Ok(algorithm.mark_hard(card, now)))?;
        tracing::info!(card_id = id, "marked card hard");
        self.save_flashcards();
        Ok(updated)
    }

    /// Mark a card learned and award mastery XP.
    pub fn mark_learned(&mut self, id: i64, now: DateTime<Utc>) -> Result<ReviewItem> {
        let algorithm = self.algorithm.as_ref();
        let updated = Self::replace_card(&mut self.flashcards, id, |card| {
            Ok(algorithm.mark_learned(card, now))
        })?;
        tracing::info!(card_id = id, "marked card learned");
        self.progress.add_xp(LEARNED_XP);
        self.persist();
        Ok(updated)
    }

    pub fn record_visit(&mut self, now: DateTime<Utc>) {
        self.progress.record_visit(now);
        self.save_progress();
    }

    /// Returns false if the lesson was already complete.
    pub fn complete_lesson(&mut self, topic: &str) -> bool {
        let added = self.progress.complete_lesson(topic);
        if added {
            tracing::info!(topic, "completed lesson");
            self.save_progress();
        }
        added
    }

    /// Record a quiz result and return the XP it earned.
    pub fn save_quiz_score(
        &mut self,
        topic: &str,
        score: u32,
        total_questions: u32,
        now: DateTime<Utc>,
    ) -> Result<u32> {
        let earned = self
            .progress
            .save_quiz_score(topic, score, total_questions, now)?;
        tracing::info!(topic, score, total_questions, earned, "saved quiz score");
        self.save_progress();
        Ok(earned)
    }

    /// Discard all progress and start over from the catalog.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.progress = Progress::new(now);
        self.flashcards = Self::initial_cards(self.algorithm.as_ref(), &self.catalog, now);
        tracing::info!("reset progress");
        self.persist();
    }

    /// Write everything back. Returns whether both writes succeeded.
    pub fn persist(&self) -> bool {
        let progress = self.save_progress();
        let flashcards = self.save_flashcards();
        progress && flashcards
    }

    fn save_progress(&self) -> bool {
        self.store.save(keys::PROGRESS, &self.progress)
    }

    fn save_flashcards(&self) -> bool {
        self.store.save(keys::FLASHCARDS, &self.flashcards)
    }

    fn replace_card(
        flashcards: &mut [ReviewItem],
        id: i64,
        update: impl FnOnce(&ReviewItem) -> Result<ReviewItem>,
    ) -> Result<ReviewItem> {
        let slot = flashcards
            .iter_mut()
            .find(|card| card.id == id)
            .ok_or(LabError::CardNotFound(id))?;
        let updated = update(slot)?;
        *slot = updated.clone();
        Ok(updated)
    }
}
