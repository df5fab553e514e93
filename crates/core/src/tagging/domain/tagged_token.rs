use super::pos_category::PosCategory;

/// A surface form paired with the primary tag assigned by the analyzer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedToken {
    pub surface: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(surface: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            tag: tag.into(),
        }
    }

    /// The category this token's tag maps to, if any.
    pub fn category(&self) -> Option<PosCategory> {
        PosCategory::from_tag(&self.tag)
    }
}
