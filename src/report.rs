//! Presentation-facing outputs
//!
//! Plain serializable structures handed to whatever renders the results:
//! the ranked term table, node/edge lists, and a per-document summary.

use serde::Serialize;

use crate::filter::FilteredView;
use crate::graph::csr::CsrGraph;
use crate::pagerank::Ranking;
use crate::pipeline::runner::Analysis;

/// One row of the ranked term table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTerm {
    /// 1-based position
    pub rank: usize,
    pub token: String,
    pub score: f64,
}

/// Terms sorted by descending score, ties by first occurrence
pub fn ranked_term_table(ranking: &Ranking) -> Vec<RankedTerm> {
    ranking
        .ranked()
        .enumerate()
        .map(|(i, node)| RankedTerm {
            rank: i + 1,
            token: node.token.clone(),
            score: node.score,
        })
        .collect()
}

/// Unweighted, undirected node and edge lists
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GraphStructure {
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
}

impl GraphStructure {
    pub fn from_graph(graph: &CsrGraph) -> Self {
        Self {
            nodes: graph.tokens.clone(),
            edges: graph
                .edges()
                .map(|(a, b)| (graph.token(a).to_string(), graph.token(b).to_string()))
                .collect(),
        }
    }

    pub fn from_view(view: &FilteredView) -> Self {
        Self {
            nodes: view.nodes.iter().map(|n| n.token.clone()).collect(),
            edges: view.edges.clone(),
        }
    }
}

/// Headline numbers for one analyzed document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub document: String,
    pub tokens: usize,
    pub nodes: usize,
    pub edges: usize,
    pub converged: bool,
    pub top_terms: Vec<RankedTerm>,
}

impl DocumentSummary {
    pub fn new(document: impl Into<String>, analysis: &Analysis, top: usize) -> Self {
        let mut top_terms = analysis.ranked_terms();
        top_terms.truncate(top);
        Self {
            document: document.into(),
            tokens: analysis.token_count(),
            nodes: analysis.node_count(),
            edges: analysis.edge_count(),
            converged: analysis.ranking().converged(),
            top_terms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, Selection};
    use crate::graph::build_graph;
    use crate::pagerank::standard::StandardPageRank;

    #[test]
    fn test_ranked_term_table() {
        let graph = build_graph(&["hub", "left", "hub", "right"], 1);
        let ranking = StandardPageRank::new().rank(&graph);
        let table = ranked_term_table(&ranking);

        assert_eq!(table.len(), 3);
        assert_eq!(table[0].rank, 1);
        assert_eq!(table[0].token, "hub");
        assert_eq!(table[1].token, "left");
        assert_eq!(table[2].token, "right");
        assert!(table.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_graph_structure() {
        let graph = build_graph(&["ai", "model", "data", "ai", "neural"], 2);
        let structure = GraphStructure::from_graph(&graph);

        assert_eq!(structure.nodes, vec!["ai", "model", "data", "neural"]);
        assert_eq!(structure.edges.len(), 5);
        assert!(structure
            .edges
            .contains(&("ai".to_string(), "neural".to_string())));
    }

    #[test]
    fn test_graph_structure_from_view() {
        let graph = build_graph(&["hub", "left", "hub", "right"], 1);
        let ranking = StandardPageRank::new().rank(&graph);
        let view = filter(&graph, &ranking, &Selection::top_k(2)).unwrap();
        let structure = GraphStructure::from_view(&view);

        assert_eq!(structure.nodes, vec!["hub", "left"]);
        assert_eq!(structure.edges, vec![("hub".to_string(), "left".to_string())]);
    }

    #[test]
    fn test_serializes_to_json() {
        let term = RankedTerm {
            rank: 1,
            token: "graph".to_string(),
            score: 0.5,
        };
        let json = serde_json::to_value(&term).unwrap();
        assert_eq!(json["token"], "graph");
        assert_eq!(json["rank"], 1);
    }
}
