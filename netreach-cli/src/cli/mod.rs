//! Command-line interface orchestration for netreach.
//!
//! `run` builds a petgraph graph from `--nodes` and `--edge` flags and prints
//! one summarized integration value per step count. `self-test` checks the
//! four-node reference graph.

mod commands;

pub use commands::{
    Cli, CliError, Command, EdgeArg, EdgeArgError, ExecutionSummary, RunCommand, SummaryArg,
    render_summary, run_cli,
};
