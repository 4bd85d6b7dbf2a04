//! Static sign-letter recognition from tracked hand joints.
//!
//! Each tick a [`JointFrame`] per hand is reduced to a [`HandPose`], matched
//! against a [`LetterCatalog`], and debounced by a per-hand [`HoldFilter`].

pub mod catalog;
pub mod config;
pub mod hold;
pub mod matcher;
pub mod pipeline;
pub mod pose;
pub mod recognizer;
pub mod synthetic;
pub mod types;

pub use catalog::{CatalogError, LetterCatalog};
pub use config::RecognizerConfig;
pub use hold::HoldFilter;
pub use matcher::PoseMatcher;
pub use pipeline::start_recognizer;
pub use pose::{PoseExtractor, PoseThresholds};
pub use recognizer::{LetterRecognizer, UntrackedHand};
pub use types::{
    Finger, HandFrames, HandPose, Handedness, Joint, JointFrame, Letter, Position,
    RecognizedLetters,
};
