use clap::{Parser, Subcommand};
use flowspec::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "flowspec-cli",
    about = "Compile a workflow canvas graph to an executable specification, or back"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a canvas graph JSON file into a workflow specification.
    Compile {
        /// Path to the canvas graph JSON.
        graph: PathBuf,
        /// Previously persisted specification; its inputs, output expression
        /// and meta entries are carried over.
        #[arg(long)]
        existing: Option<PathBuf>,
        /// Write the specification here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Reconstruct a canvas graph from a workflow specification.
    Decompile {
        /// Path to the workflow specification JSON.
        spec: PathBuf,
        /// Write the graph here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compile {
            graph,
            existing,
            output,
        } => {
            let graph = CanvasGraph::from_json_str(&fs::read_to_string(&graph)?)?;
            let existing = match existing {
                Some(path) => Some(WorkflowSpec::from_json_str(&fs::read_to_string(&path)?)?),
                None => None,
            };

            let start = Instant::now();
            let spec = graph_to_workflow_spec(&graph, existing.as_ref())?;
            eprintln!(
                "Compiled {} canvas node(s) into {} specification node(s) in {:?}",
                graph.nodes.len(),
                spec.nodes.len(),
                start.elapsed()
            );

            emit(&spec.to_json_string()?, output)?;
        }
        Command::Decompile { spec, output } => {
            let spec = WorkflowSpec::from_json_str(&fs::read_to_string(&spec)?)?;
            let graph = workflow_spec_to_graph(&spec);
            eprintln!(
                "Reconstructed {} canvas node(s) and {} edge(s)",
                graph.nodes.len(),
                graph.edges.len()
            );
            emit(&graph.to_json_string()?, output)?;
        }
    }

    Ok(())
}

fn emit(json: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(&path, json)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
