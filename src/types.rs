//! Shared configuration types
//!
//! [`AnalysisConfig`] covers everything that affects the token sequence, the
//! graph, and the ranking. Presentation settings live in
//! [`crate::filter::Selection`] so that changing them never forces a re-rank.

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Smallest accepted co-occurrence window.
pub const MIN_WINDOW_SIZE: usize = 1;
/// Largest accepted co-occurrence window.
pub const MAX_WINDOW_SIZE: usize = 5;

/// How the sliding window treats the tail of the token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowBoundary {
    /// Every position anchors a window, bounded by the remaining length.
    #[default]
    Full,
    /// Anchors stop `window_size` positions before the end, dropping the
    /// pairs that would only be formed by trailing anchors.
    Truncated,
}

/// How repeated co-occurrence of the same pair is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWeighting {
    /// An edge either exists or it does not.
    #[default]
    Binary,
    /// Each repeated co-occurrence adds 1.0 to the edge weight.
    CooccurrenceCount,
}

/// What to do with out-of-range parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterPolicy {
    /// Reject with [`crate::Error::InvalidParameters`].
    #[default]
    Reject,
    /// Clamp window size and top-k into range and log a warning.
    Clamp,
}

/// Configuration for the normalize → graph → rank pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Language code for the stopword list (e.g. `"id"`, `"en"`)
    pub language: String,
    /// Co-occurrence window, in token positions
    pub window_size: usize,
    pub window_boundary: WindowBoundary,
    pub edge_weighting: EdgeWeighting,
    /// PageRank damping factor
    pub damping: f64,
    /// Convergence tolerance on the maximum per-node change
    pub tolerance: f64,
    pub max_iterations: usize,
    /// A document needs strictly more tokens than this to be analyzed
    pub min_tokens: usize,
    pub parameter_policy: ParameterPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            language: "id".to_string(),
            window_size: 2,
            window_boundary: WindowBoundary::Full,
            edge_weighting: EdgeWeighting::Binary,
            damping: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
            min_tokens: 5,
            parameter_policy: ParameterPolicy::Reject,
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from JSON. Omitted fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_window_boundary(mut self, boundary: WindowBoundary) -> Self {
        self.window_boundary = boundary;
        self
    }

    pub fn with_edge_weighting(mut self, weighting: EdgeWeighting) -> Self {
        self.edge_weighting = weighting;
        self
    }

    pub fn with_parameter_policy(mut self, policy: ParameterPolicy) -> Self {
        self.parameter_policy = policy;
        self
    }
}
