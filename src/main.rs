use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use blockflow::analysis::{self, edges, flow, Analysis};
use blockflow::config::Config;
use blockflow::core::{DependencyGraph, Snapshot};
use blockflow::{bflog, bflog_error, Error, Result};

/// Blockflow - dependency and flow analysis for block boards
#[derive(Parser, Debug)]
#[command(name = "blockflow")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    BLOCKFLOW_DEBUG=1     Enable debug logging (alternative to --debug)\n    BLOCKFLOW_DEBUG=trace Also log every discovered chain")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.blockflow/blockflow.log)
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Config file (defaults to ~/.blockflow/blockflow.toml)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short = 'p', long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run every pass and print the full analysis
    Analyze {
        /// Snapshot JSON file (uses the configured snapshot if omitted)
        snapshot: Option<PathBuf>,
    },

    /// Print blocked tasks and the per-block rollup
    Blocked {
        snapshot: Option<PathBuf>,
    },

    /// Print flow chains with per-task step and color
    Chains {
        snapshot: Option<PathBuf>,
    },

    /// Print block edges with routed geometry
    Edges {
        snapshot: Option<PathBuf>,
    },
}

impl Command {
    fn snapshot(&self) -> Option<&PathBuf> {
        match self {
            Command::Analyze { snapshot }
            | Command::Blocked { snapshot }
            | Command::Chains { snapshot }
            | Command::Edges { snapshot } => snapshot.as_ref(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockedOutput<'a> {
    blocked_task_ids: &'a std::collections::BTreeSet<blockflow::TaskId>,
    blocked_block_ids: &'a std::collections::BTreeMap<blockflow::BlockId, bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChainsOutput<'a> {
    chains: &'a [Vec<blockflow::TaskId>],
    task_step: &'a std::collections::BTreeMap<blockflow::TaskId, usize>,
    task_color: &'a std::collections::BTreeMap<blockflow::TaskId, usize>,
    flows: &'a [analysis::FlowSummary],
}

fn main() {
    let cli = Cli::parse();
    blockflow::log::init(cli.debug);
    bflog!("blockflow starting: {:?}", cli.command);

    if let Err(e) = run(&cli) {
        bflog_error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let path = cli
        .command
        .snapshot()
        .cloned()
        .or_else(|| config.snapshot_path())
        .ok_or(Error::NoSnapshot)?;
    let snapshot = Snapshot::load(&path)?;
    let card = config.card_size();

    match &cli.command {
        Command::Analyze { .. } => print_json(&analysis::analyze(&snapshot, card), cli.pretty),
        Command::Blocked { .. } => {
            let graph = DependencyGraph::build(&snapshot.tasks);
            let blocked = analysis::blocking::blocked_in(&graph);
            let blocks = analysis::blocking::rollup(&snapshot.blocks, graph.tasks(), &blocked);
            print_json(
                &BlockedOutput {
                    blocked_task_ids: &blocked,
                    blocked_block_ids: &blocks,
                },
                cli.pretty,
            )
        }
        Command::Chains { .. } => {
            let Analysis {
                chains,
                task_step,
                task_color,
                flows,
                ..
            } = analysis::analyze(&snapshot, card);
            print_json(
                &ChainsOutput {
                    chains: &chains,
                    task_step: &task_step,
                    task_color: &task_color,
                    flows: &flows,
                },
                cli.pretty,
            )
        }
        Command::Edges { .. } => {
            let graph = DependencyGraph::build(&snapshot.tasks);
            let flows = flow::chains_in(&graph);
            let visual = edges::project_edges(
                &snapshot.manual_edges,
                &graph,
                &flows,
                &snapshot.positions(),
                card,
            );
            print_json(&visual, cli.pretty)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    let mut out = io::stdout().lock();
    writeln!(out, "{}", json)?;
    Ok(())
}
