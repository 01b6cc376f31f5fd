//! Error types
//!
//! Only caller mistakes and degenerate input surface as errors. Missing
//! linguistic resources degrade to fallbacks and PageRank exhaustion is
//! reported on the ranking itself, so neither appears here.

use crate::pipeline::validation::ValidationReport;

/// Errors produced by the analysis pipeline.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// One or more parameters were rejected before any computation started.
    #[error("invalid parameters: {0}")]
    InvalidParameters(ValidationReport),

    /// The document produced too few tokens to build a meaningful graph.
    #[error("insufficient content: {tokens} tokens after normalization, more than {required} required")]
    InsufficientContent { tokens: usize, required: usize },

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
