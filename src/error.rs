//! Error type shared by the syntax layer, the engine and the renderers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocError>;

#[derive(Debug, Error)]
pub enum DocError {
    /// The source text could not be split into declarations.
    #[error("{file}:{line}: {message}")]
    Syntax {
        file: String,
        line: usize,
        message: String,
    },

    /// A class ends up extending itself through its ancestors.
    #[error("cyclic inheritance: {}", chain.join(" -> "))]
    CyclicInheritance { chain: Vec<String> },

    #[error("failed to serialize documentation: {0}")]
    Render(#[from] serde_json::Error),
}
