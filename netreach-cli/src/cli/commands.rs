//! Command implementations and argument parsing for the netreach CLI.

use std::{
    io::{self, Write},
    str::FromStr,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use netreach_core::{
    GraphSource, Integration, IntegrationBuilder, IntegrationError, Summary, SummaryTable,
};
use petgraph::{Directed, EdgeType, Undirected, graph::Graph};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Step counts and expected mean integration for the self-test graph.
const SELF_TEST_EXPECTED: [(usize, f64); 2] = [(1, 1.0 / 3.0), (2, 0.5)];
const SELF_TEST_TOLERANCE: f64 = 1e-12;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "netreach",
    about = "Measure how much of a graph each node reaches within k hops."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns whether the command asked for intermediate diagnostics.
    #[must_use]
    pub fn debug_requested(&self) -> bool {
        matches!(&self.command, Command::Run(run) if run.debug)
    }
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute integration for a graph given on the command line.
    Run(RunCommand),
    /// Check integration against the four-node reference graph.
    SelfTest,
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Number of nodes; nodes are numbered from zero.
    #[arg(long)]
    pub nodes: usize,

    /// Edge as `FROM:TO`; repeat for every edge.
    #[arg(long = "edge", value_name = "FROM:TO")]
    pub edges: Vec<EdgeArg>,

    /// Treat every edge as traversable in both directions.
    #[arg(long)]
    pub undirected: bool,

    /// First step count considered.
    #[arg(long = "min-k", default_value_t = 0)]
    pub min_k: usize,

    /// Step count upper bound (exclusive).
    #[arg(long = "max-k", default_value_t = 1)]
    pub max_k: usize,

    /// Stride between step counts.
    #[arg(long = "k-step", default_value_t = 1)]
    pub k_step: usize,

    /// Reduction applied across nodes for each step count.
    #[arg(long, value_enum, default_value_t = SummaryArg::Mean)]
    pub summarizer: SummaryArg,

    /// Log intermediate distances and counts to stderr; an explicit `RUST_LOG`
    /// takes precedence.
    #[arg(long)]
    pub debug: bool,
}

/// A directed edge given as `FROM:TO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeArg {
    /// Tail node.
    pub from: usize,
    /// Head node.
    pub to: usize,
}

/// Error raised when an `--edge` value is not `FROM:TO`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("edge `{raw}` must be two node indices separated by `:`")]
pub struct EdgeArgError {
    raw: String,
}

impl FromStr for EdgeArg {
    type Err = EdgeArgError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || EdgeArgError {
            raw: raw.to_owned(),
        };
        let (from, to) = raw.split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            from: from.trim().parse().map_err(|_| invalid())?,
            to: to.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Summaries selectable with `--summarizer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryArg {
    /// Arithmetic mean across nodes.
    Mean,
    /// Median across nodes.
    Median,
    /// Least integrated node.
    Min,
    /// Most integrated node.
    Max,
}

impl From<SummaryArg> for Summary {
    fn from(value: SummaryArg) -> Self {
        match value {
            SummaryArg::Mean => Self::Mean,
            SummaryArg::Median => Self::Median,
            SummaryArg::Min => Self::Min,
            SummaryArg::Max => Self::Max,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An edge referenced a node outside `0..nodes`.
    #[error("edge {from}:{to} references a node outside 0..{nodes}")]
    EdgeOutOfRange {
        /// Tail node of the offending edge.
        from: usize,
        /// Head node of the offending edge.
        to: usize,
        /// Number of nodes declared with `--nodes`.
        nodes: usize,
    },
    /// The reference graph produced an unexpected value.
    #[error("self-test failed at k={k}: expected {expected}, got {actual:?}")]
    SelfTestFailed {
        /// Step count that disagreed.
        k: usize,
        /// Value the reference graph must produce.
        expected: f64,
        /// Value actually produced, if any.
        actual: Option<f64>,
    },
    /// Core computation failed.
    #[error(transparent)]
    Core(#[from] IntegrationError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the graph implementation.
    pub graph: String,
    /// Number of nodes in the graph.
    pub nodes: usize,
    /// Reduction applied across nodes.
    pub summarizer: Summary,
    /// One value per step count.
    pub summary: SummaryTable,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the graph is malformed or integration fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use netreach_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::try_parse_from([
///     "netreach", "run", "--nodes", "3", "--edge", "0:1", "--edge", "1:2", "--max-k", "3",
/// ])?;
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.summary.ks().collect::<Vec<_>>(), vec![0, 1, 2]);
/// assert_eq!(summary.summary.get(2), Some(0.5));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Run(run) => {
            span.record("command", field::display("run"));
            run_command(run)
        }
        Command::SelfTest => {
            span.record("command", field::display("self-test"));
            run_self_test()
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        nodes = command.nodes,
        edges = command.edges.len(),
        undirected = command.undirected,
        summarizer = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let integration = IntegrationBuilder::new()
        .with_min_k(command.min_k)
        .with_max_k(command.max_k)
        .with_k_step(command.k_step)
        .with_debug(command.debug)
        .build()?;
    let summarizer = Summary::from(command.summarizer);
    Span::current().record("summarizer", field::display(summarizer));

    let summary = if command.undirected {
        let graph = build_graph::<Undirected>(command.nodes, &command.edges)?;
        integrate(&integration, &graph, summarizer)?
    } else {
        let graph = build_graph::<Directed>(command.nodes, &command.edges)?;
        integrate(&integration, &graph, summarizer)?
    };

    info!(
        graph = summary.graph.as_str(),
        columns = summary.summary.len(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.self_test", err)]
pub(super) fn run_self_test() -> Result<ExecutionSummary, CliError> {
    let integration = IntegrationBuilder::new()
        .with_min_k(1)
        .with_max_k(3)
        .build()?;
    let graph = build_graph::<Undirected>(
        4,
        &[EdgeArg { from: 0, to: 1 }, EdgeArg { from: 1, to: 2 }],
    )?;
    let summary = integrate(&integration, &graph, Summary::Mean)?;

    for (k, expected) in SELF_TEST_EXPECTED {
        let actual = summary.summary.get(k);
        let agrees = actual.is_some_and(|value| (value - expected).abs() < SELF_TEST_TOLERANCE);
        if !agrees {
            return Err(CliError::SelfTestFailed {
                k,
                expected,
                actual,
            });
        }
    }
    info!("self-test passed");
    Ok(summary)
}

/// Hands the edge list to petgraph after checking every endpoint.
pub(super) fn build_graph<Ty: EdgeType>(
    nodes: usize,
    edges: &[EdgeArg],
) -> Result<Graph<(), (), Ty, usize>, CliError> {
    if let Some(edge) = edges
        .iter()
        .find(|edge| edge.from >= nodes || edge.to >= nodes)
    {
        return Err(CliError::EdgeOutOfRange {
            from: edge.from,
            to: edge.to,
            nodes,
        });
    }

    let mut graph = Graph::with_capacity(nodes, edges.len());
    for _ in 0..nodes {
        graph.add_node(());
    }
    graph.extend_with_edges(edges.iter().map(|edge| (edge.from, edge.to)));
    Ok(graph)
}

fn integrate<Ty: EdgeType>(
    integration: &Integration,
    graph: &Graph<(), (), Ty, usize>,
    summarizer: Summary,
) -> Result<ExecutionSummary, CliError> {
    let summary = integration.run_with(graph, &summarizer)?;
    Ok(ExecutionSummary {
        graph: GraphSource::name(graph).to_owned(),
        nodes: graph.node_count(),
        summarizer,
        summary,
    })
}

/// Renders `summary` to `writer` as a header followed by one `k<TAB>value`
/// line per step count.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use netreach_cli::cli::{Cli, Command, render_summary, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = run_cli(Cli { command: Command::SelfTest })?;
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.starts_with("graph: petgraph-undirected\nnodes: 4\nsummarizer: mean\n"));
/// assert!(text.ends_with("2\t0.5\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "graph: {}", summary.graph)?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "summarizer: {}", summary.summarizer)?;
    for &(k, value) in summary.summary.entries() {
        writeln!(writer, "{k}\t{value}")?;
    }
    Ok(())
}
