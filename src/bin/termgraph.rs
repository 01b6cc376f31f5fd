//! `termgraph` CLI: rank the terms of plain-text documents.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use termgraph::{
    AnalysisConfig, DocumentSummary, GraphStructure, ParameterPolicy, Pipeline, Selection,
    WindowBoundary,
};

#[derive(Parser)]
#[command(name = "termgraph", version, about = "Rank document terms by co-occurrence graph centrality")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the ranked term table for one document
    Rank {
        /// Text file, or `-` for stdin
        input: PathBuf,
        #[command(flatten)]
        analysis: AnalysisArgs,
        /// Print at most this many rows
        #[arg(long)]
        limit: Option<usize>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print a filtered graph view for one document as JSON
    Graph {
        /// Text file, or `-` for stdin
        input: PathBuf,
        #[command(flatten)]
        analysis: AnalysisArgs,
        /// Keep the K highest-ranked nodes
        #[arg(long, default_value_t = 20)]
        top_k: usize,
        /// Keep exactly these nodes (repeatable); overrides --top-k
        #[arg(long = "node")]
        nodes: Vec<String>,
        /// Highlight these terms (repeatable, case-insensitive)
        #[arg(long = "search")]
        search: Vec<String>,
        /// Print only node and edge lists
        #[arg(long)]
        structure_only: bool,
    },
    /// Analyze several documents in parallel and summarize each
    Batch {
        /// Text files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[command(flatten)]
        analysis: AnalysisArgs,
        /// Top terms listed per document
        #[arg(long, default_value_t = 20)]
        top: usize,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct AnalysisArgs {
    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Co-occurrence window, 1 to 5
    #[arg(short, long)]
    window: Option<usize>,
    /// Stopword language code
    #[arg(short, long)]
    language: Option<String>,
    /// Stop windows before the end of the token sequence
    #[arg(long)]
    truncated_window: bool,
    /// Clamp out-of-range parameters instead of rejecting them
    #[arg(long)]
    clamp: bool,
}

impl AnalysisArgs {
    fn config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                AnalysisConfig::from_json(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => AnalysisConfig::default(),
        };
        if let Some(window) = self.window {
            config.window_size = window;
        }
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if self.truncated_window {
            config.window_boundary = WindowBoundary::Truncated;
        }
        if self.clamp {
            config.parameter_policy = ParameterPolicy::Clamp;
        }
        Ok(config)
    }

    fn pipeline(&self) -> Result<Pipeline> {
        Ok(Pipeline::new(self.config()?)?)
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Command::Rank {
            input,
            analysis,
            limit,
            json,
        } => {
            let pipeline = analysis.pipeline()?;
            let text = read_input(&input)?;
            let result = pipeline
                .analyze(&text)
                .with_context(|| format!("analyzing {}", input.display()))?;

            let mut table = result.ranked_terms();
            if let Some(limit) = limit {
                table.truncate(limit);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                println!(
                    "tokens: {}  nodes: {}  edges: {}",
                    result.token_count(),
                    result.node_count(),
                    result.edge_count()
                );
                for term in &table {
                    println!("{:>5}  {:<24} {:.6}", term.rank, term.token, term.score);
                }
            }
        }
        Command::Graph {
            input,
            analysis,
            top_k,
            nodes,
            search,
            structure_only,
        } => {
            let pipeline = analysis.pipeline()?;
            let text = read_input(&input)?;
            let result = pipeline
                .analyze(&text)
                .with_context(|| format!("analyzing {}", input.display()))?;

            let selection = Selection::top_k(top_k)
                .with_explicit_nodes(nodes)
                .with_search_terms(search);
            let view = result.filter(&selection)?;
            if structure_only {
                let structure = GraphStructure::from_view(&view);
                println!("{}", serde_json::to_string_pretty(&structure)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&view)?);
            }
        }
        Command::Batch {
            inputs,
            analysis,
            top,
            json,
        } => {
            let pipeline = analysis.pipeline()?;
            let texts = inputs
                .iter()
                .map(|path| read_input(path))
                .collect::<Result<Vec<_>>>()?;

            let mut summaries = Vec::new();
            for (path, result) in inputs.iter().zip(pipeline.analyze_batch(&texts)) {
                match result {
                    Ok(analysis) => {
                        summaries.push(DocumentSummary::new(
                            path.display().to_string(),
                            &analysis,
                            top,
                        ));
                    }
                    Err(err) => tracing::warn!(
                        document = %path.display(),
                        error = %err,
                        "skipping document"
                    ),
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for summary in &summaries {
                    println!(
                        "{}  tokens: {}  nodes: {}  edges: {}",
                        summary.document, summary.tokens, summary.nodes, summary.edges
                    );
                    for term in &summary.top_terms {
                        println!("  {:>3}  {:<24} {:.6}", term.rank, term.token, term.score);
                    }
                }
            }
        }
    }

    Ok(())
}
