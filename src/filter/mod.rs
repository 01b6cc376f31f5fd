//! Filtered, highlighted views of a ranked graph
//!
//! A [`Selection`] picks which nodes a presentation layer sees and which of
//! them to highlight. The [`FilteredView`] is the induced subgraph over the
//! picked nodes plus a display size per node. Filtering only reads the
//! [`Ranking`]; scores in the view are copied verbatim.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::graph::csr::CsrGraph;
use crate::pagerank::Ranking;
use crate::pipeline::validation::validate_selection;
use crate::types::ParameterPolicy;

/// Which nodes to show and which to highlight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selection {
    /// Keep the `top_k` highest-ranked nodes
    pub top_k: usize,
    /// When non-empty, keep exactly these tokens instead of the top `top_k`
    pub explicit_nodes: Vec<String>,
    /// Case-insensitive tokens to highlight; does not affect inclusion
    pub search_terms: Vec<String>,
    /// Size multiplier for ordinary nodes
    pub base_size_factor: f64,
    /// Size multiplier for highlighted nodes, larger than `base_size_factor`
    pub highlight_size_factor: f64,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            top_k: 20,
            explicit_nodes: Vec::new(),
            search_terms: Vec::new(),
            base_size_factor: 1000.0,
            highlight_size_factor: 2000.0,
        }
    }
}

impl Selection {
    /// Parse a selection from JSON. Omitted fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn top_k(top_k: usize) -> Self {
        Self {
            top_k,
            ..Self::default()
        }
    }

    pub fn with_explicit_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit_nodes = nodes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_size_factors(mut self, base: f64, highlight: f64) -> Self {
        self.base_size_factor = base;
        self.highlight_size_factor = highlight;
        self
    }
}

/// A node as presented
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewNode {
    pub token: String,
    pub score: f64,
    pub size: f64,
    pub highlighted: bool,
}

/// Induced subgraph with highlight marks
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FilteredView {
    /// Included nodes from highest to lowest score
    pub nodes: Vec<ViewNode>,
    /// Edges with both endpoints included, as token pairs
    pub edges: Vec<(String, String)>,
    /// Included tokens matching a search term
    pub highlighted: Vec<String>,
}

impl FilteredView {
    pub fn node(&self, token: &str) -> Option<&ViewNode> {
        self.nodes.iter().find(|n| n.token == token)
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.edges
            .iter()
            .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds [`FilteredView`]s with a validated [`Selection`]
#[derive(Debug, Clone)]
pub struct FilterEngine {
    selection: Selection,
}

impl FilterEngine {
    /// Validate `selection`, rejecting out-of-range values
    pub fn new(selection: Selection) -> Result<Self> {
        Self::with_policy(selection, ParameterPolicy::Reject)
    }

    /// Validate `selection` under `policy`
    pub fn with_policy(selection: Selection, policy: ParameterPolicy) -> Result<Self> {
        let selection = validate_selection(&selection, policy)?;
        Ok(Self { selection })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Derive the view for `graph` and its `ranking`
    pub fn apply(&self, graph: &CsrGraph, ranking: &Ranking) -> FilteredView {
        let selection = &self.selection;
        let included = included_nodes(graph, ranking, selection);

        let search: FxHashSet<String> = selection
            .search_terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        let mut highlighted = Vec::new();
        let nodes = included
            .iter()
            .map(|&id| {
                let token = graph.token(id);
                let score = ranking.score_by_id(id);
                let is_hit = search.contains(token);
                if is_hit {
                    highlighted.push(token.to_string());
                }
                let factor = if is_hit {
                    selection.highlight_size_factor
                } else {
                    selection.base_size_factor
                };
                ViewNode {
                    token: token.to_string(),
                    score,
                    size: score * factor,
                    highlighted: is_hit,
                }
            })
            .collect();

        let keep: FxHashSet<u32> = included.iter().copied().collect();
        let edges = graph
            .edges()
            .filter(|(a, b)| keep.contains(a) && keep.contains(b))
            .map(|(a, b)| (graph.token(a).to_string(), graph.token(b).to_string()))
            .collect();

        FilteredView {
            nodes,
            edges,
            highlighted,
        }
    }
}

/// Validate `selection` and derive the view in one call
pub fn filter(graph: &CsrGraph, ranking: &Ranking, selection: &Selection) -> Result<FilteredView> {
    Ok(FilterEngine::new(selection.clone())?.apply(graph, ranking))
}

/// Node IDs to include, in ranking order
fn included_nodes(graph: &CsrGraph, ranking: &Ranking, selection: &Selection) -> Vec<u32> {
    if selection.explicit_nodes.is_empty() {
        return ranking
            .ranked_ids()
            .iter()
            .copied()
            .take(selection.top_k)
            .collect();
    }

    let mut wanted = FxHashSet::default();
    for token in &selection.explicit_nodes {
        let token = token.trim().to_lowercase();
        match graph.node_id(&token) {
            Some(id) => {
                wanted.insert(id);
            }
            None => tracing::debug!(token = %token, "explicit node not in graph, ignored"),
        }
    }

    ranking
        .ranked_ids()
        .iter()
        .copied()
        .filter(|id| wanted.contains(id))
        .collect()
}
