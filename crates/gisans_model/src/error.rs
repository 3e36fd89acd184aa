//! Model-layer error types.

/// Errors that can occur while building or validating sample models.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A slab stack needs at least an ambient and a substrate slab.
    #[error("ambient and substrate slabs required, got {0}")]
    TooFewSlabs(usize),

    /// Slab names identify layers and must not repeat within a stack.
    #[error("slab name `{0}` is not unique")]
    DuplicateSlabName(String),
}
