//! Error types for Lattice Adapter.

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Precondition violations raised by adapter operations.
///
/// Navigational edge cases (stale indices, expanding an already expanded
/// node, clicks on non-data slots) are not errors; those operations quietly
/// return `0`, `None` or `false`. The variants here signal caller bugs that
/// would otherwise go unnoticed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// A position-dependent operation ran before the adapter was attached.
    #[error("Adapter is not attached to a host surface. Call attach() first")]
    NotAttached,

    /// The adapter is already attached to a host surface.
    #[error("Adapter is already attached to a host surface")]
    AlreadyAttached,

    /// No view holder factory was supplied at construction.
    #[error("No view holder factory registered for view type {view_type}")]
    MissingHolderFactory {
        /// Debug rendering of the requested view type.
        view_type: String,
    },

    /// Empty-view state switching needs an empty layout configuration.
    #[error("Empty view state requires an EmptyLayoutConfig")]
    MissingEmptyConfig,
}

impl AdapterError {
    /// Create a missing-factory error for the given view type.
    pub fn missing_holder_factory(view_type: impl std::fmt::Debug) -> Self {
        Self::MissingHolderFactory {
            view_type: format!("{view_type:?}"),
        }
    }
}
