use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{CatalogError, LetterCatalog},
    hold::{DEFAULT_DWELL, HoldFilter},
    matcher::PoseMatcher,
    pose::{PoseExtractor, PoseThresholds},
    types::{HandFrames, HandPose, Handedness, JointFrame, Letter, RecognizedLetters},
};

/// What a frame with no tracked joints contributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UntrackedHand {
    /// Extract it like any other frame. Every check fails, so it reads as
    /// the all-flexed pose and can match a letter.
    #[default]
    Collapse,
    /// Treat it as no candidate.
    NoCandidate,
}

/// Full per-tick pipeline for both hands.
pub struct LetterRecognizer {
    extractor: PoseExtractor,
    catalog: Arc<LetterCatalog>,
    untracked: UntrackedHand,
    filters: [HoldFilter; 2],
    last_candidate: [Option<Letter>; 2],
    last_confirmed: [Option<Letter>; 2],
}

impl LetterRecognizer {
    pub fn new(catalog: Arc<LetterCatalog>, thresholds: PoseThresholds, dwell: Duration) -> Self {
        Self {
            extractor: PoseExtractor::new(thresholds),
            catalog,
            untracked: UntrackedHand::default(),
            filters: [HoldFilter::new(dwell), HoldFilter::new(dwell)],
            last_candidate: [None; 2],
            last_confirmed: [None; 2],
        }
    }

    /// Standard alphabet with default thresholds and dwell.
    pub fn standard() -> Result<Self, CatalogError> {
        Ok(Self::new(
            Arc::new(LetterCatalog::standard()?),
            PoseThresholds::default(),
            DEFAULT_DWELL,
        ))
    }

    pub fn with_untracked(mut self, untracked: UntrackedHand) -> Self {
        self.untracked = untracked;
        self
    }

    pub fn catalog(&self) -> &LetterCatalog {
        &self.catalog
    }

    pub fn extract_pose(&self, frame: &JointFrame) -> HandPose {
        self.extractor.extract_pose(frame)
    }

    /// Unfiltered candidate for a single frame.
    pub fn classify(&self, frame: &JointFrame) -> Option<Letter> {
        if self.untracked == UntrackedHand::NoCandidate && !frame.is_tracked() {
            return None;
        }
        let pose = self.extractor.extract_pose(frame);
        PoseMatcher::new(&self.catalog).match_pose(&pose)
    }

    pub fn update(&mut self, hand: Handedness, frame: &JointFrame, now: Instant) -> Option<Letter> {
        let candidate = self.classify(frame);
        let slot = hand.index();

        if candidate != self.last_candidate[slot] {
            log::debug!(
                "{} hand candidate: {}",
                hand.label(),
                candidate.map_or_else(|| "none".to_string(), |l| l.to_string())
            );
            self.last_candidate[slot] = candidate;
        }

        let confirmed = self.filters[slot].update(candidate, now);
        if confirmed != self.last_confirmed[slot] {
            if let Some(letter) = confirmed {
                log::info!("{} hand confirmed letter {letter}", hand.label());
            }
            self.last_confirmed[slot] = confirmed;
        }
        confirmed
    }

    pub fn update_hands(&mut self, frames: &HandFrames) -> RecognizedLetters {
        let mut letters = RecognizedLetters::default();
        for hand in Handedness::BOTH {
            letters.set(hand, self.update(hand, frames.get(hand), frames.timestamp));
        }
        letters
    }

    pub fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
        self.last_candidate = [None; 2];
        self.last_confirmed = [None; 2];
    }
}
