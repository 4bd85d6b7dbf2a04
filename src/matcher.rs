use crate::{
    catalog::LetterCatalog,
    types::{HandPose, Letter},
};

/// Exact-equality lookup of an extracted pose in a catalog.
pub struct PoseMatcher<'a> {
    catalog: &'a LetterCatalog,
}

impl<'a> PoseMatcher<'a> {
    pub fn new(catalog: &'a LetterCatalog) -> Self {
        Self { catalog }
    }

    /// First letter whose template equals `pose`, if any.
    pub fn match_pose(&self, pose: &HandPose) -> Option<Letter> {
        self.catalog
            .lookup_all()
            .find(|(_, template)| template == pose)
            .map(|(letter, _)| letter)
    }
}
