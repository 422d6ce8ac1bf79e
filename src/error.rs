use thiserror::Error;

/// Everything that can go wrong when building or inspecting a [`Tree`][crate::Tree].
///
/// Looking up or deleting a value that isn't in the tree is not an error; those operations
/// return `None` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Construction was handed something that isn't a sequence of orderable values.
    #[error("Invalid input {input:?}: {reason}")]
    InvalidInput {
        /// The offending piece of input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The operation needs a non-empty tree.
    #[error("Operation requires a non-empty tree: {0}")]
    PreconditionViolated(&'static str),
}

/// Shorthand for results produced by this crate.
pub type TreeResult<T> = Result<T, TreeError>;
