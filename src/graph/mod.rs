//! Graph construction and representation
//!
//! This module provides efficient graph building and storage
//! for the co-occurrence graph.

pub mod builder;
pub mod csr;

use crate::types::{EdgeWeighting, WindowBoundary};
use builder::{GraphBuilder, WindowOptions};
use csr::CsrGraph;

/// Build the co-occurrence graph with the full window and binary edges
pub fn build_graph<S: AsRef<str>>(tokens: &[S], window_size: usize) -> CsrGraph {
    build_graph_with(tokens, window_size, WindowBoundary::Full, EdgeWeighting::Binary)
}

/// Build the co-occurrence graph with explicit window handling
pub fn build_graph_with<S: AsRef<str>>(
    tokens: &[S],
    window_size: usize,
    boundary: WindowBoundary,
    weighting: EdgeWeighting,
) -> CsrGraph {
    let builder = GraphBuilder::from_tokens(
        tokens,
        window_size,
        WindowOptions {
            boundary,
            weighting,
        },
    );
    CsrGraph::from_builder(&builder)
}
