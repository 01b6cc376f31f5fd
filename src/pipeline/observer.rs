//! Pipeline observer: hooks for logging, profiling and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages and capturing graph sizes or
//! convergence details for diagnostics.

use std::time::{Duration, Instant};

pub const STAGE_NORMALIZE: &str = "normalize";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_RANK: &str = "rank";

/// Measurements for one completed stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    pub elapsed: Duration,
    pub tokens: Option<usize>,
    pub nodes: Option<usize>,
    pub edges: Option<usize>,
    pub iterations: Option<usize>,
    pub converged: Option<bool>,
    pub residual: Option<f64>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }
}

/// Fluent construction of a [`StageReport`].
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn tokens(mut self, tokens: usize) -> Self {
        self.report.tokens = Some(tokens);
        self
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.report.iterations = Some(iterations);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.report.converged = Some(converged);
        self
    }

    pub fn residual(mut self, residual: f64) -> Self {
        self.report.residual = Some(residual);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Wall-clock timer for a single stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    start: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Receives stage boundary notifications.
///
/// Both methods default to doing nothing.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records every stage report in order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    stages: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stages(&self) -> &[(&'static str, StageReport)] {
        &self.stages
    }

    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.stages
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|(_, r)| r.elapsed).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.stages.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .nodes(4)
            .edges(5)
            .iterations(12)
            .converged(true)
            .residual(1e-7)
            .build();

        assert_eq!(report.elapsed, Duration::from_millis(3));
        assert_eq!(report.nodes, Some(4));
        assert_eq!(report.edges, Some(5));
        assert_eq!(report.iterations, Some(12));
        assert_eq!(report.converged, Some(true));
        assert_eq!(report.tokens, None);
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut observer = StageTimingObserver::new();
        observer.on_stage_start(STAGE_NORMALIZE);
        observer.on_stage_end(STAGE_NORMALIZE, &StageReport::new(Duration::from_millis(1)));
        observer.on_stage_end(STAGE_GRAPH, &StageReport::new(Duration::from_millis(2)));

        let names: Vec<_> = observer.stages().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![STAGE_NORMALIZE, STAGE_GRAPH]);
        assert_eq!(observer.total(), Duration::from_millis(3));
        assert!(observer.report(STAGE_RANK).is_none());
    }
}
