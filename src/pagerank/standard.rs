//! Standard PageRank algorithm
//!
//! Implements the classic PageRank with power iteration and proper
//! handling of dangling nodes. Iteration stops once the largest per-node
//! change drops to the threshold, or after `max_iterations`.

use super::{PageRankResult, Ranking};
use crate::graph::csr::CsrGraph;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Rank a graph and attach tokens to the scores
    ///
    /// The graph should have at least one node; an empty graph yields an
    /// empty ranking.
    pub fn rank(&self, graph: &CsrGraph) -> Ranking {
        let result = self.run(graph);
        if !result.converged {
            tracing::debug!(
                iterations = result.iterations,
                delta = result.delta,
                threshold = self.threshold,
                "pagerank stopped before convergence"
            );
        }
        Ranking::from_result(graph, result)
    }

    /// Run PageRank, spreading each node's score by edge weight
    ///
    /// On a binary graph every weight is 1.0, so this is the 1/degree
    /// transition of the unweighted model. Returns the result even if
    /// convergence wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        self.iterate(graph, |node, score, new_scores| {
            let total_weight = graph.node_total_weight(node);
            if total_weight > 0.0 {
                for (neighbor, weight) in graph.neighbors(node) {
                    new_scores[neighbor as usize] += self.damping * score * weight / total_weight;
                }
            }
        })
    }

    fn iterate<F>(&self, graph: &CsrGraph, propagate: F) -> PageRankResult
    where
        F: Fn(u32, f64, &mut [f64]),
    {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        // Initialize scores uniformly
        let initial_score = 1.0 / n as f64;
        let mut scores = vec![initial_score; n];
        let mut new_scores = vec![0.0; n];

        let dangling_nodes = graph.dangling_nodes();

        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.threshold {
            iterations += 1;

            // Mass of dangling nodes is spread uniformly
            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
            let dangling_contribution = self.damping * dangling_mass / n as f64;

            new_scores.fill(teleport + dangling_contribution);

            for (node, &node_score) in scores.iter().enumerate() {
                propagate(node as u32, node_score, &mut new_scores);
            }

            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .fold(0.0, f64::max);

            std::mem::swap(&mut scores, &mut new_scores);
        }

        // Normalize scores (they should already sum to ~1, but ensure numerical stability)
        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        PageRankResult::new(scores, iterations, delta, delta <= self.threshold)
    }
}
