//! Nodle function network compiler
//!
//! Loads a saved graph, compiles it with the built-in mappings and prints
//! the resulting network.

use nodle_fn::nodes::{factory, NodeGraph};
use nodle_fn::types::{FLOAT, INTEGER};
use nodle_fn::{compile_with, get_mappings, CompiledNetwork, CompilerConfig};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "nodle-fn",
    version,
    about = "Compile a node graph into a multi-function network"
)]
struct Cli {
    /// Graph to compile, as saved JSON
    #[arg(required_unless_present = "demo")]
    graph: Option<PathBuf>,

    /// Compiler settings file
    config: Option<PathBuf>,

    /// Write a sample graph to this path instead of compiling
    #[arg(long, value_name = "PATH", conflicts_with_all = ["graph", "config"])]
    demo: Option<PathBuf>,
}

/// Writes a small graph exercising conversions, vectorization and lists
fn write_demo(path: &Path) -> Result<(), String> {
    let mut graph = NodeGraph::new();
    let math = graph.add_node(factory::float_math(false, true));
    let combine = graph.add_node(factory::combine_vector([false, false, false]));
    let length = graph.add_node(factory::list_length(&FLOAT));
    let pack = graph.add_node(factory::pack_list(&INTEGER, &[false, false]));
    let element = graph.add_node(factory::get_list_element(&INTEGER));
    let vector_math = graph.add_node(factory::vector_math());

    let links = [
        (math, 0, length, 0),
        (length, 0, pack, 0),
        (pack, 0, element, 0),
        (element, 0, combine, 0),
        (element, 0, vector_math, 1),
        (combine, 0, vector_math, 0),
    ];
    for (from_node, from_port, to_node, to_port) in links {
        graph.add_connection_by_ids(from_node, from_port, to_node, to_port)?;
    }

    graph.save_to_file(path)?;
    info!("Wrote demo graph with {} nodes to {}", graph.nodes.len(), path.display());
    Ok(())
}

fn print_network(compiled: &CompiledNetwork) {
    let network = &compiled.network;
    println!("{} nodes, {} links", network.node_count(), network.link_count());

    println!("nodes:");
    for node in network.nodes() {
        let label = compiled.node_label(node.id).unwrap_or("?");
        let kind = if node.is_dummy() { " (dummy)" } else { "" };
        println!("  #{} {}{}", node.id, label, kind);
        for (index, data_type) in node.inputs.iter().enumerate() {
            println!("    in{}: {}", index, data_type);
        }
        for (index, data_type) in node.outputs.iter().enumerate() {
            println!("    out{}: {}", index, data_type);
        }
    }

    println!("links:");
    for link in network.links() {
        println!("  {} -> {}", link.from, link.to);
    }

    println!("resources:");
    for name in compiled.resources.names() {
        println!("  {}", name);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    if let Some(path) = &cli.demo {
        return write_demo(path);
    }
    let graph_path = cli.graph.as_deref().ok_or("No graph file given")?;

    let graph = NodeGraph::load_from_file(graph_path)?;
    let config = match &cli.config {
        Some(config_path) => CompilerConfig::load_from_file(config_path)?,
        None => CompilerConfig::default(),
    };

    let compiled = compile_with(&graph, get_mappings(), &config)
        .map_err(|e| format!("Compilation failed ({}): {}", e.cause(), e))?;
    print_network(&compiled);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_graph_with_optional_config() {
        let cli = Cli::try_parse_from(["nodle-fn", "graph.json"]).unwrap();
        assert_eq!(cli.graph, Some(PathBuf::from("graph.json")));
        assert_eq!(cli.config, None);

        let cli = Cli::try_parse_from(["nodle-fn", "graph.json", "config.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("config.json")));
    }

    #[test]
    fn test_demo_needs_no_graph() {
        let cli = Cli::try_parse_from(["nodle-fn", "--demo", "out.json"]).unwrap();
        assert_eq!(cli.demo, Some(PathBuf::from("out.json")));
        assert_eq!(cli.graph, None);

        assert!(Cli::try_parse_from(["nodle-fn"]).is_err());
        assert!(Cli::try_parse_from(["nodle-fn", "--demo", "out.json", "graph.json"]).is_err());
    }

    #[test]
    fn test_help_is_not_an_error() {
        let error = Cli::try_parse_from(["nodle-fn", "--help"]).err().unwrap();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
