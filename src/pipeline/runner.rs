//! Pipeline runner: runs the stages of one analysis in order.
//!
//! [`Pipeline::analyze`] runs normalize → graph → rank for one document and
//! returns an [`Analysis`]. The stages run strictly in order and share no
//! state, so [`Pipeline::analyze_batch`] fans independent documents out over
//! rayon's thread pool.
//!
//! Filtering is not a pipeline stage: it runs on a finished [`Analysis`] and
//! can be repeated with different selections without re-ranking.

use rayon::prelude::*;

use crate::errors::{Error, Result};
use crate::filter::{FilterEngine, FilteredView, Selection};
use crate::graph::build_graph_with;
use crate::graph::csr::CsrGraph;
use crate::nlp::normalizer::{Capabilities, Normalizer};
use crate::pagerank::standard::StandardPageRank;
use crate::pagerank::{RankedNode, Ranking};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReportBuilder, STAGE_GRAPH, STAGE_NORMALIZE,
    STAGE_RANK,
};
use crate::pipeline::validation::validate_config;
use crate::report::{ranked_term_table, GraphStructure, RankedTerm};
use crate::types::{AnalysisConfig, ParameterPolicy};

/// Enter a tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Tokens, graph and ranking for one document at one window size
#[derive(Debug, Clone)]
pub struct Analysis {
    tokens: Vec<String>,
    graph: CsrGraph,
    ranking: Ranking,
    window_size: usize,
    parameter_policy: ParameterPolicy,
}

impl Analysis {
    /// Filtered token sequence in document order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn graph(&self) -> &CsrGraph {
        &self.graph
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of tokens that survived normalization
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn node_count(&self) -> usize {
        self.graph.num_nodes
    }

    pub fn edge_count(&self) -> usize {
        self.graph.num_undirected_edges()
    }

    /// Score of `token`, if it is a node
    pub fn score(&self, token: &str) -> Option<f64> {
        self.ranking.score(token)
    }

    /// The `n` highest-ranked terms
    pub fn top_terms(&self, n: usize) -> Vec<&RankedNode> {
        self.ranking.top_n(n)
    }

    /// Full ranked term table
    pub fn ranked_terms(&self) -> Vec<RankedTerm> {
        ranked_term_table(&self.ranking)
    }

    /// Node and edge lists of the whole graph
    pub fn graph_structure(&self) -> GraphStructure {
        GraphStructure::from_graph(&self.graph)
    }

    /// Derive a filtered view; the ranking is left untouched
    ///
    /// The selection is validated under the policy the analysis ran with.
    pub fn filter(&self, selection: &Selection) -> Result<FilteredView> {
        self.filter_with_policy(selection, self.parameter_policy)
    }

    pub fn filter_with_policy(
        &self,
        selection: &Selection,
        policy: ParameterPolicy,
    ) -> Result<FilteredView> {
        let engine = FilterEngine::with_policy(selection.clone(), policy)?;
        Ok(engine.apply(&self.graph, &self.ranking))
    }
}

/// Normalize → graph → rank with a validated configuration
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: AnalysisConfig,
    normalizer: Normalizer,
}

impl Pipeline {
    /// Validate `config` and probe linguistic resources once
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        let config = validate_config(&config)?;
        let normalizer = Normalizer::new(&config.language);
        Ok(Self { config, normalizer })
    }

    /// Use a prepared normalizer instead of the default resources
    pub fn with_normalizer(config: AnalysisConfig, normalizer: Normalizer) -> Result<Self> {
        let config = validate_config(&config)?;
        Ok(Self { config, normalizer })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        self.normalizer.capabilities()
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Analyze one document
    pub fn analyze(&self, text: &str) -> Result<Analysis> {
        self.analyze_with_observer(text, &mut NoopObserver)
    }

    /// Analyze several independent documents in parallel, preserving order
    pub fn analyze_batch<S>(&self, texts: &[S]) -> Vec<Result<Analysis>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.analyze(text.as_ref()))
            .collect()
    }

    /// Analyze one document, notifying `observer` at each stage boundary
    pub fn analyze_with_observer(
        &self,
        text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<Analysis> {
        let cfg = &self.config;

        // Stage 1: Normalize
        let tokens = {
            trace_stage!(STAGE_NORMALIZE);
            observer.on_stage_start(STAGE_NORMALIZE);
            let clock = StageClock::start();
            let tokens = self.normalizer.normalize(text);
            let report = StageReportBuilder::new(clock.elapsed())
                .tokens(tokens.len())
                .build();
            observer.on_stage_end(STAGE_NORMALIZE, &report);
            tokens
        };

        if tokens.len() <= cfg.min_tokens {
            tracing::debug!(
                tokens = tokens.len(),
                required = cfg.min_tokens,
                "insufficient content, skipping graph construction"
            );
            return Err(Error::InsufficientContent {
                tokens: tokens.len(),
                required: cfg.min_tokens,
            });
        }

        // Stage 2: Build graph
        let graph = {
            trace_stage!(STAGE_GRAPH);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let graph = build_graph_with(
                &tokens,
                cfg.window_size,
                cfg.window_boundary,
                cfg.edge_weighting,
            );
            let report = StageReportBuilder::new(clock.elapsed())
                .nodes(graph.num_nodes)
                .edges(graph.num_undirected_edges())
                .build();
            observer.on_stage_end(STAGE_GRAPH, &report);
            graph
        };

        // distinct tokens that never share a window
        if graph.is_empty() {
            tracing::debug!(tokens = tokens.len(), "no co-occurring pairs, nothing to rank");
            return Err(Error::InsufficientContent {
                tokens: tokens.len(),
                required: cfg.min_tokens,
            });
        }

        // Stage 3: Rank
        let ranking = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let ranking = StandardPageRank::new()
                .with_damping(cfg.damping)
                .with_max_iterations(cfg.max_iterations)
                .with_threshold(cfg.tolerance)
                .rank(&graph);
            let report = StageReportBuilder::new(clock.elapsed())
                .iterations(ranking.iterations())
                .converged(ranking.converged())
                .residual(ranking.delta())
                .build();
            observer.on_stage_end(STAGE_RANK, &report);
            ranking
        };

        tracing::debug!(
            tokens = tokens.len(),
            nodes = graph.num_nodes,
            edges = graph.num_undirected_edges(),
            iterations = ranking.iterations(),
            "document analyzed"
        );

        Ok(Analysis {
            tokens,
            graph,
            ranking,
            window_size: cfg.window_size,
            parameter_policy: cfg.parameter_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::stopwords::StopwordFilter;
    use crate::pipeline::observer::StageTimingObserver;
    use crate::types::WindowBoundary;

    const TEXT: &str = "Neural networks learn graph representations. Graph neural \
        networks propagate node features along graph edges, and node embeddings \
        summarise graph structure for downstream ranking.";

    fn pipeline() -> Pipeline {
        Pipeline::new(AnalysisConfig::default().with_language("en")).unwrap()
    }

    #[test]
    fn test_analyze_basic() {
        let analysis = pipeline().analyze(TEXT).unwrap();

        assert!(analysis.token_count() > 5);
        assert!(analysis.node_count() > 1);
        assert!((analysis.ranking().total() - 1.0).abs() < 1e-6);
        assert_eq!(analysis.top_terms(1)[0].token, "graph");
    }

    #[test]
    fn test_insufficient_content() {
        let err = pipeline().analyze("graph neural networks").unwrap_err();
        match err {
            Error::InsufficientContent { tokens, required } => {
                assert_eq!(tokens, 3);
                assert_eq!(required, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(
            pipeline().analyze(""),
            Err(Error::InsufficientContent { tokens: 0, .. })
        ));
    }

    #[test]
    fn test_exactly_min_tokens_rejected() {
        let text = "alpha beta gamma delta epsilon";
        assert!(pipeline().analyze(text).is_err());
        let text = "alpha beta gamma delta epsilon zeta";
        assert!(pipeline().analyze(text).is_ok());
    }

    #[test]
    fn test_repeated_single_token_document() {
        let analysis = pipeline().analyze("graph graph graph graph graph graph").unwrap();

        assert_eq!(analysis.node_count(), 1);
        assert_eq!(analysis.edge_count(), 0);
        assert!((analysis.score("graph").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_custom_normalizer() {
        let stopwords = StopwordFilter::from_list(&["graph"]);
        let p = Pipeline::with_normalizer(
            AnalysisConfig::default(),
            Normalizer::with_stopwords(stopwords),
        )
        .unwrap();

        let analysis = p.analyze(TEXT).unwrap();
        assert!(analysis.score("graph").is_none());
        // only the custom list applies, so "and" survives
        assert!(analysis.score("and").is_some());
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let err = Pipeline::new(AnalysisConfig::default().with_window_size(6)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }

    #[test]
    fn test_observer_sees_all_stages() {
        let mut observer = StageTimingObserver::new();
        let analysis = pipeline().analyze_with_observer(TEXT, &mut observer).unwrap();

        let names: Vec<_> = observer.stages().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![STAGE_NORMALIZE, STAGE_GRAPH, STAGE_RANK]);

        let graph = observer.report(STAGE_GRAPH).unwrap();
        assert_eq!(graph.nodes, Some(analysis.node_count()));
        assert_eq!(graph.edges, Some(analysis.edge_count()));
        assert_eq!(
            observer.report(STAGE_RANK).unwrap().converged,
            Some(analysis.ranking().converged())
        );
    }

    #[test]
    fn test_observer_stops_at_normalize_on_short_input() {
        let mut observer = StageTimingObserver::new();
        let _ = pipeline().analyze_with_observer("tiny", &mut observer);
        assert_eq!(observer.stages().len(), 1);
    }

    #[test]
    fn test_analyze_is_pure() {
        let p = pipeline();
        let first = p.analyze(TEXT).unwrap();
        let second = p.analyze(TEXT).unwrap();

        assert_eq!(first.tokens(), second.tokens());
        assert_eq!(first.graph().col_idx, second.graph().col_idx);
        assert_eq!(first.ranked_terms(), second.ranked_terms());
    }

    #[test]
    fn test_batch_matches_sequential() {
        let p = pipeline();
        let docs = [TEXT, "too short", TEXT];
        let results = p.analyze_batch(&docs);

        assert_eq!(results.len(), 3);
        assert!(results[1].is_err());
        let sequential = p.analyze(TEXT).unwrap();
        for idx in [0, 2] {
            let batch = results[idx].as_ref().unwrap();
            assert_eq!(batch.ranked_terms(), sequential.ranked_terms());
        }
    }

    #[test]
    fn test_truncated_boundary_changes_tail() {
        let text = "alpha beta gamma alpha delta epsilon";
        let full = pipeline().analyze(text).unwrap();
        let truncated = Pipeline::new(
            AnalysisConfig::default()
                .with_language("en")
                .with_window_boundary(WindowBoundary::Truncated),
        )
        .unwrap()
        .analyze(text)
        .unwrap();

        assert!(full.edge_count() > truncated.edge_count());
    }

    #[test]
    fn test_distinct_tokens_without_pairs_are_insufficient() {
        let mut config = AnalysisConfig::default()
            .with_language("en")
            .with_window_boundary(WindowBoundary::Truncated);
        config.min_tokens = 1;
        let p = Pipeline::new(config).unwrap();

        assert!(matches!(
            p.analyze("alpha beta"),
            Err(Error::InsufficientContent { tokens: 2, .. })
        ));
        // a repeated token still yields the singleton graph
        let analysis = p.analyze("alpha alpha").unwrap();
        assert_eq!(analysis.node_count(), 1);
    }

    #[test]
    fn test_filter_from_analysis() {
        let analysis = pipeline().analyze(TEXT).unwrap();
        let view = analysis
            .filter(&Selection::top_k(3).with_search_terms(["GRAPH"]))
            .unwrap();

        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.highlighted, vec!["graph"]);
    }

    #[test]
    fn test_filter_follows_config_policy() {
        let strict = pipeline().analyze(TEXT).unwrap();
        assert!(matches!(
            strict.filter(&Selection::top_k(0)),
            Err(Error::InvalidParameters(_))
        ));

        let lenient = Pipeline::new(
            AnalysisConfig::default()
                .with_language("en")
                .with_parameter_policy(ParameterPolicy::Clamp),
        )
        .unwrap()
        .analyze(TEXT)
        .unwrap();
        let view = lenient.filter(&Selection::top_k(0)).unwrap();
        assert_eq!(view.nodes.len(), 1);
        assert_eq!(view.nodes[0].token, "graph");

        assert!(lenient
            .filter_with_policy(&Selection::top_k(0), ParameterPolicy::Reject)
            .is_err());
    }
}
