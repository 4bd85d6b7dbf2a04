use std::collections::HashMap;

use thiserror::Error;

use crate::types::{Finger, HandPose, Letter};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("letter catalog is empty")]
    Empty,
    #[error("letter {0} has more than one template")]
    DuplicateLetter(Letter),
    #[error("letters {first} and {second} share the template {pose}")]
    DuplicateTemplate {
        first: Letter,
        second: Letter,
        pose: HandPose,
    },
}

/// Immutable letter-to-pose table, validated once at construction.
///
/// No two letters share a template, so a pose matches at most one letter.
#[derive(Clone, Debug)]
pub struct LetterCatalog {
    templates: Vec<(Letter, HandPose)>,
}

impl LetterCatalog {
    pub fn new(
        templates: impl IntoIterator<Item = (Letter, HandPose)>,
    ) -> Result<Self, CatalogError> {
        let templates: Vec<(Letter, HandPose)> = templates.into_iter().collect();
        if templates.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_pose: HashMap<HandPose, Letter> = HashMap::with_capacity(templates.len());
        for (i, &(letter, pose)) in templates.iter().enumerate() {
            if templates[..i].iter().any(|&(seen, _)| seen == letter) {
                return Err(CatalogError::DuplicateLetter(letter));
            }
            if let Some(&first) = by_pose.get(&pose) {
                return Err(CatalogError::DuplicateTemplate {
                    first,
                    second: letter,
                    pose,
                });
            }
            by_pose.insert(pose, letter);
        }

        log::debug!("letter catalog ready with {} templates", templates.len());
        Ok(Self { templates })
    }

    /// A, B, D, E, F, I, L, U, W and Y.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(STANDARD.iter().map(|&(l, f, t)| (l, pose(f, t))))
    }

    /// The reduced A, B, L alphabet.
    pub fn basic() -> Result<Self, CatalogError> {
        Self::new(
            STANDARD
                .iter()
                .filter(|(l, _, _)| matches!(l, Letter::A | Letter::B | Letter::L))
                .map(|&(l, f, t)| (l, pose(f, t))),
        )
    }

    pub fn lookup_all(&self) -> impl Iterator<Item = (Letter, HandPose)> + '_ {
        self.templates.iter().copied()
    }

    pub fn template(&self, letter: Letter) -> Option<HandPose> {
        self.templates
            .iter()
            .find(|(l, _)| *l == letter)
            .map(|&(_, pose)| pose)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn pose(extended: &[Finger], thumb_touching_index: bool) -> HandPose {
    let pose = extended
        .iter()
        .fold(HandPose::flexed(), |pose, &finger| pose.with_extended(finger));
    if thumb_touching_index {
        pose.with_thumb_touching_index()
    } else {
        pose
    }
}

// Static handshapes only. V shares U's finger flags and is left out.
const STANDARD: [(Letter, &[Finger], bool); 10] = [
    (Letter::A, &[Finger::Thumb], false),
    (
        Letter::B,
        &[Finger::Index, Finger::Middle, Finger::Ring, Finger::Little],
        false,
    ),
    (Letter::D, &[Finger::Index], false),
    (Letter::E, &[], false),
    (Letter::F, &[Finger::Middle, Finger::Ring, Finger::Little], true),
    (Letter::I, &[Finger::Little], false),
    (Letter::L, &[Finger::Thumb, Finger::Index], false),
    (Letter::U, &[Finger::Index, Finger::Middle], false),
    (
        Letter::W,
        &[Finger::Index, Finger::Middle, Finger::Ring],
        false,
    ),
    (Letter::Y, &[Finger::Thumb, Finger::Little], false),
];
