//! `termgraph`: keyword ranking over a word co-occurrence graph.
//!
//! A document's text is normalized into a filtered token sequence, tokens
//! within a sliding window are linked in an undirected graph, and PageRank
//! over that graph ranks the terms. Filtered views select and highlight
//! nodes for presentation without touching the scores.
//!
//! ```no_run
//! use termgraph::{AnalysisConfig, Pipeline, Selection};
//!
//! # fn main() -> termgraph::Result<()> {
//! let pipeline = Pipeline::new(AnalysisConfig::default().with_language("en"))?;
//! let analysis = pipeline.analyze("graph ranking of words in a word graph ...")?;
//! for term in analysis.ranked_terms().iter().take(10) {
//!     println!("{:>3} {:<20} {:.5}", term.rank, term.token, term.score);
//! }
//! let view = analysis.filter(&Selection::top_k(20).with_search_terms(["graph"]))?;
//! # let _ = view;
//! # Ok(())
//! # }
//! ```
//!
//! Scope:
//! - Plain text in; extracting text from PDFs or other binary formats is the host's job
//! - In-memory only; nothing is persisted
//! - Structural ranking only, no embeddings or topic models

pub mod errors;
pub mod filter;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod report;
pub mod types;

pub use errors::{Error, Result};
pub use filter::{filter, FilterEngine, FilteredView, Selection, ViewNode};
pub use graph::build_graph;
pub use graph::csr::CsrGraph;
pub use nlp::normalizer::{normalize, Capabilities, Normalizer};
pub use nlp::stopwords::{StopwordFilter, StopwordProvider};
pub use pagerank::standard::StandardPageRank;
pub use pagerank::Ranking;
pub use pipeline::cache::{AnalysisCache, DocumentId};
pub use pipeline::runner::{Analysis, Pipeline};
pub use report::{ranked_term_table, DocumentSummary, GraphStructure, RankedTerm};
pub use types::{AnalysisConfig, EdgeWeighting, ParameterPolicy, WindowBoundary};
