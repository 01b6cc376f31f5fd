//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR is optimized for iteration over neighbors, which is exactly what
//! PageRank needs during power iteration. This is the immutable graph
//! handed to ranking and filtering.

use rustc_hash::FxHashMap;

use super::builder::GraphBuilder;

/// A graph in Compressed Sparse Row format
///
/// CSR stores edges contiguously, making iteration over neighbors very fast.
/// This is ideal for PageRank which repeatedly iterates over all edges.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (target nodes) for each edge
    pub col_idx: Vec<u32>,
    /// Edge weights (all 1.0 for binary graphs)
    pub weights: Vec<f64>,
    /// Out-degree for each node
    pub out_degree: Vec<u32>,
    /// Total outgoing weight for each node
    pub total_weight: Vec<f64>,
    /// Tokens for each node
    pub tokens: Vec<String>,
    /// First occurrence of each node's token in the source sequence
    pub first_positions: Vec<usize>,
    token_to_id: FxHashMap<String, u32>,
}

impl CsrGraph {
    /// Convert a GraphBuilder into CSR format
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        let mut out_degree = Vec::with_capacity(num_nodes);
        let mut total_weight = Vec::with_capacity(num_nodes);
        let mut tokens = Vec::with_capacity(num_nodes);
        let mut first_positions = Vec::with_capacity(num_nodes);
        let mut token_to_id =
            FxHashMap::with_capacity_and_hasher(num_nodes, Default::default());

        row_ptr.push(0);

        for (id, node) in builder.nodes() {
            tokens.push(node.token.clone());
            first_positions.push(node.first_position);
            token_to_id.insert(node.token.clone(), id);

            // Collect and sort edges for deterministic iteration
            let mut edges: Vec<_> = node.edges.iter().map(|(&k, &v)| (k, v)).collect();
            edges.sort_by_key(|(k, _)| *k);

            out_degree.push(edges.len() as u32);
            total_weight.push(edges.iter().map(|(_, w)| w).sum());

            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }

            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            out_degree,
            total_weight,
            tokens,
            first_positions,
            token_to_id,
        }
    }

    /// Iterate over neighbors of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Get the out-degree of a node
    pub fn degree(&self, node: u32) -> u32 {
        self.out_degree[node as usize]
    }

    /// Get the total outgoing weight of a node
    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    /// Get the token for a node
    pub fn token(&self, node: u32) -> &str {
        &self.tokens[node as usize]
    }

    /// Get the first source position of a node's token
    pub fn first_position(&self, node: u32) -> usize {
        self.first_positions[node as usize]
    }

    /// Get node ID by token
    pub fn node_id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Check whether two nodes share an edge
    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        let start = self.row_ptr[a as usize];
        let end = self.row_ptr[a as usize + 1];
        self.col_idx[start..end].binary_search(&b).is_ok()
    }

    /// Undirected edges as `(low, high)` node ID pairs, each listed once
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.num_nodes as u32).flat_map(move |node| {
            self.neighbors(node)
                .filter(move |&(target, _)| node < target)
                .map(move |(target, _)| (node, target))
        })
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Get the total number of edges (counting each undirected edge twice)
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Get the number of undirected edges
    pub fn num_undirected_edges(&self) -> usize {
        self.col_idx.len() / 2
    }

    /// Find dangling nodes (nodes with no outgoing edges)
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.out_degree[n as usize] == 0)
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            out_degree: Vec::new(),
            total_weight: Vec::new(),
            tokens: Vec::new(),
            first_positions: Vec::new(),
            token_to_id: FxHashMap::default(),
        }
    }
}
