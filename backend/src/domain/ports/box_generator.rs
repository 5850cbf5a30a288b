//! Port producing suggested bounding boxes for an image.

use crate::domain::BoxDraft;

/// Source of predicted bounding boxes.
#[cfg_attr(test, mockall::automock)]
pub trait BoxGenerator: Send + Sync {
    /// Produce a batch of boxes to attach to an image.
    fn generate(&self) -> Vec<BoxDraft>;
}
