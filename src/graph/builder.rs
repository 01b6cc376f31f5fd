//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) edge lookups during construction.

use rustc_hash::FxHashMap;

use crate::types::{EdgeWeighting, WindowBoundary};

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The token for this node
    pub token: String,
    /// Position of the token's first occurrence in the source sequence
    pub first_position: usize,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(token: impl Into<String>, first_position: usize) -> Self {
        Self {
            token: token.into(),
            first_position,
            edges: FxHashMap::default(),
        }
    }
}

/// Sliding-window options for [`GraphBuilder::from_tokens`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowOptions {
    pub boundary: WindowBoundary,
    pub weighting: EdgeWeighting,
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug)]
pub struct GraphBuilder {
    /// Maps token -> node ID
    token_to_id: FxHashMap<String, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self {
            token_to_id: FxHashMap::default(),
            nodes: Vec::new(),
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            token_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given token, returning its ID
    ///
    /// `position` only matters when the node is created.
    pub fn get_or_create_node(&mut self, token: &str, position: usize) -> u32 {
        if let Some(&id) = self.token_to_id.get(token) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.token_to_id.insert(token.to_string(), id);
        self.nodes.push(BuilderNode::new(token, position));
        id
    }

    /// Add an unweighted edge between two nodes
    ///
    /// Adding an existing edge is a no-op.
    pub fn add_edge(&mut self, from: u32, to: u32) {
        if from == to {
            return; // No self-loops
        }

        if let Some(node) = self.nodes.get_mut(from as usize) {
            node.edges.entry(to).or_insert(1.0);
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            node.edges.entry(from).or_insert(1.0);
        }
    }

    /// Increment the edge weight between two nodes
    ///
    /// If the edge doesn't exist, it's created with `weight`.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return; // No self-loops
        }

        // Add edge in both directions (undirected graph)
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Build a co-occurrence graph from a token sequence
    ///
    /// Every pair of positions `(i, i + w)` with `1 <= w <= window_size`
    /// becomes an edge unless both positions hold the same token. With
    /// [`WindowBoundary::Full`] every position anchors a window bounded by
    /// the remaining length; with [`WindowBoundary::Truncated`] anchors stop
    /// `window_size` positions before the end.
    ///
    /// A non-empty sequence that forms no pair (a single distinct token)
    /// yields a one-node graph. Node IDs follow first occurrence.
    pub fn from_tokens<S: AsRef<str>>(
        tokens: &[S],
        window_size: usize,
        options: WindowOptions,
    ) -> Self {
        let mut builder = Self::with_capacity(tokens.len() / 2);
        let len = tokens.len();

        let mut first_positions: FxHashMap<&str, usize> = FxHashMap::default();
        for (pos, token) in tokens.iter().enumerate() {
            first_positions.entry(token.as_ref()).or_insert(pos);
        }

        let anchors = match options.boundary {
            WindowBoundary::Full => len,
            WindowBoundary::Truncated => len.saturating_sub(window_size),
        };

        for i in 0..anchors {
            let reach = window_size.min(len - 1 - i);
            let left = tokens[i].as_ref();

            for w in 1..=reach {
                let right = tokens[i + w].as_ref();
                if left == right {
                    continue;
                }

                let from = builder.get_or_create_node(left, first_positions[left]);
                let to = builder.get_or_create_node(right, first_positions[right]);
                match options.weighting {
                    EdgeWeighting::Binary => builder.add_edge(from, to),
                    EdgeWeighting::CooccurrenceCount => builder.increment_edge(from, to, 1.0),
                }
            }
        }

        // a sequence of one repeated token is a single isolated node
        if builder.is_empty() {
            if let Some(only) = tokens.first() {
                let only = only.as_ref();
                if tokens.iter().all(|t| t.as_ref() == only) {
                    builder.get_or_create_node(only, 0);
                }
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by token
    pub fn get_node_id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Check whether two tokens share an edge
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.get_node_id(a), self.get_node_id(b)) {
            (Some(a), Some(b)) => self.nodes[a as usize].edges.contains_key(&b),
            _ => false,
        }
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
