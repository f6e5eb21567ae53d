/// One-shot texture loading
use crate::error::TextureError;
use crate::scene::TextureId;

/// Completion callback for a texture request
pub type TextureCallback<I> = Box<dyn FnOnce(Result<I, TextureError>)>;

/// Host facility that fetches an image and reports back exactly once.
///
/// There is no cancellation and no timeout; a loader that never calls
/// `done` simply leaves the globe on its default material.
pub trait TextureLoader {
    type Image;

    fn load(&self, url: &str, done: TextureCallback<Self::Image>);
}

/// Lifecycle of the single texture request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureSlot {
    #[default]
    Pending,
    Applied(TextureId),
    Failed,
}

impl TextureSlot {
    pub fn is_pending(&self) -> bool {
        matches!(self, TextureSlot::Pending)
    }

    /// Settle the slot. Returns false if it was already settled.
    pub fn settle(&mut self, outcome: TextureSlot) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = outcome;
        true
    }
}

/// What happened to a texture result handed to the globe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureOutcome {
    /// The mesh now uses the textured material
    Applied(TextureId),
    /// The load or upload failed; the default material stays
    KeptDefault,
    /// A result was already applied earlier
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_settles_once() {
        let mut slot = TextureSlot::default();
        assert!(slot.is_pending());
        assert!(slot.settle(TextureSlot::Applied(TextureId(1))));
        assert!(!slot.settle(TextureSlot::Failed));
        assert_eq!(slot, TextureSlot::Applied(TextureId(1)));
    }

    #[test]
    fn test_failed_slot_stays_failed() {
        let mut slot = TextureSlot::Pending;
        assert!(slot.settle(TextureSlot::Failed));
        assert!(!slot.settle(TextureSlot::Applied(TextureId(7))));
        assert_eq!(slot, TextureSlot::Failed);
    }
}
