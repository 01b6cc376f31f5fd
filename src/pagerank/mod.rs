//! PageRank over the co-occurrence graph
//!
//! [`standard::StandardPageRank`] produces a raw [`PageRankResult`] indexed by
//! node ID; [`Ranking`] attaches tokens to those scores and is what the rest
//! of the crate consumes.

pub mod standard;

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use crate::graph::csr::CsrGraph;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta (maximum absolute per-node change)
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }
}

/// A ranked node: token, score and first source position
#[derive(Debug, Clone, PartialEq)]
pub struct RankedNode {
    pub token: String,
    pub score: f64,
    pub first_position: usize,
}

/// Token → score mapping for one graph
///
/// Immutable once built. Filtering and reporting read from it but never
/// change a score.
#[derive(Debug, Clone)]
pub struct Ranking {
    /// Indexed by node ID
    nodes: Vec<RankedNode>,
    index: FxHashMap<String, u32>,
    /// Node IDs sorted by descending score, ties by first occurrence
    order: Vec<u32>,
    iterations: usize,
    delta: f64,
    converged: bool,
}

impl Ranking {
    /// Attach the graph's tokens to a PageRank result
    pub fn from_result(graph: &CsrGraph, result: PageRankResult) -> Self {
        let nodes: Vec<RankedNode> = (0..graph.num_nodes as u32)
            .map(|id| RankedNode {
                token: graph.token(id).to_string(),
                score: result.score(id),
                first_position: graph.first_position(id),
            })
            .collect();

        let index = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| (node.token.clone(), id as u32))
            .collect();

        let mut order: Vec<u32> = (0..nodes.len() as u32).collect();
        order.sort_by(|&a, &b| compare_ranked(&nodes[a as usize], &nodes[b as usize]));

        Self {
            nodes,
            index,
            order,
            iterations: result.iterations,
            delta: result.delta,
            converged: result.converged,
        }
    }

    /// Score of `token`, if it is a node
    pub fn score(&self, token: &str) -> Option<f64> {
        self.index
            .get(token)
            .map(|&id| self.nodes[id as usize].score)
    }

    /// Score of a node ID
    pub fn score_by_id(&self, node: u32) -> f64 {
        self.nodes.get(node as usize).map_or(0.0, |n| n.score)
    }

    pub fn get(&self, node: u32) -> Option<&RankedNode> {
        self.nodes.get(node as usize)
    }

    /// Node IDs from highest to lowest score
    pub fn ranked_ids(&self) -> &[u32] {
        &self.order
    }

    /// Nodes from highest to lowest score
    pub fn ranked(&self) -> impl Iterator<Item = &RankedNode> + '_ {
        self.order.iter().map(move |&id| &self.nodes[id as usize])
    }

    /// The `n` highest-ranked nodes
    pub fn top_n(&self, n: usize) -> Vec<&RankedNode> {
        self.ranked().take(n).collect()
    }

    /// `(token, score)` pairs in node ID order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.nodes.iter().map(|n| (n.token.as_str(), n.score))
    }

    /// Sum of all scores (1.0 for a non-empty ranking)
    pub fn total(&self) -> f64 {
        self.nodes.iter().map(|n| n.score).sum()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// `false` when the iteration budget ran out before the tolerance was met
    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Descending score, then ascending first occurrence
fn compare_ranked(a: &RankedNode, b: &RankedNode) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then(a.first_position.cmp(&b.first_position))
}
