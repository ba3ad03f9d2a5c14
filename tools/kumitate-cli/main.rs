use clap::Parser;
use kumitate::error::ConversionError;
use kumitate::prelude::*;
use log::{LevelFilter, info};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

// --- JSON Deserialization Structs (Input Format Specific) ---
// These structs match the graph producer's format and are only used here for conversion.

#[derive(Deserialize)]
struct RawInput {
    routes: Vec<RawRoute>,
}

#[derive(Deserialize)]
struct RawRoute {
    route: RouteSpec,
    graph: RawGraph,
    fragment: FunctionFragment,
}

#[derive(Deserialize)]
struct RawGraph {
    #[serde(default)]
    name: Option<String>,
    nodes: Vec<RawNode>,
}

#[derive(Deserialize)]
struct RawNode {
    name: String,
    node_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    input_params: Option<Vec<RawParam>>,
    #[serde(default)]
    output_params: Option<Vec<RawParam>>,
    #[serde(default)]
    next_node_name: Option<String>,
    #[serde(default)]
    python_if_condition: Option<String>,
    #[serde(default)]
    true_next_node_name: Option<String>,
    #[serde(default)]
    false_next_node_name: Option<String>,
    #[serde(default)]
    elifs: Option<Vec<RawElseIf>>,
}

#[derive(Deserialize)]
struct RawParam {
    name: String,
    param_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    optional: bool,
}

#[derive(Deserialize)]
struct RawElseIf {
    python_condition: String,
    true_next_node_name: String,
}

// --- Converter Implementation ---
// This implements the conversion from the raw JSON model to Kumitate's canonical Graph.

impl IntoGraph for RawGraph {
    fn into_graph(self) -> Result<Graph, ConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(RawNode::into_node)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Graph {
            name: self.name,
            nodes,
        })
    }
}

impl RawNode {
    fn into_node(self) -> Result<Node, ConversionError> {
        let else_ifs: Vec<ElseIf> = self
            .elifs
            .unwrap_or_default()
            .into_iter()
            .map(|e| ElseIf {
                condition: e.python_condition,
                true_next_node_name: e.true_next_node_name,
            })
            .collect();
        let kind = match self.node_type.as_str() {
            "start" => NodeKind::Start,
            "action" => NodeKind::Action,
            "end" => NodeKind::End,
            "if" if else_ifs.is_empty() => NodeKind::Branch,
            "if" => NodeKind::BranchElseIf,
            other => {
                return Err(ConversionError::ValidationError(format!(
                    "Node '{}' has unknown node_type '{}'",
                    self.name, other
                )));
            }
        };

        Ok(Node {
            name: self.name,
            kind,
            description: self.description,
            input_params: convert_params(self.input_params),
            output_params: convert_params(self.output_params),
            next_node_name: self.next_node_name,
            condition: self.python_if_condition,
            true_next_node_name: self.true_next_node_name,
            false_next_node_name: self.false_next_node_name,
            else_ifs,
        })
    }
}

fn convert_params(params: Option<Vec<RawParam>>) -> Vec<Param> {
    params
        .unwrap_or_default()
        .into_iter()
        .map(|p| Param {
            name: p.name,
            param_type: p.param_type,
            optional: p.optional,
            description: p.description,
        })
        .collect()
}

/// Assembles API routes into self-contained Python modules
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the routes JSON file
    input_path: PathBuf,

    /// Directory the service bundle is written to
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also save all compiled units as a binary archive
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .init();

    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let config = match &cli.config {
        Some(path) => AssemblerConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => AssemblerConfig::default(),
    };
    let input_json = fs::read_to_string(&cli.input_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read input file '{}': {}",
            cli.input_path.display(),
            e
        ))
    });
    let load_duration = load_start.elapsed();

    // --- 2. Parsing and Conversion ---
    let raw_input: RawInput = serde_json::from_str(&input_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse input JSON: {}", e)));
    let jobs: Vec<AssemblyJob> = raw_input
        .routes
        .into_iter()
        .map(|raw| {
            let graph = raw.graph.into_graph().unwrap_or_else(|e| {
                exit_with_error(&format!(
                    "Failed to convert graph of route '{}': {}",
                    raw.route.id, e
                ))
            });
            AssemblyJob {
                route: raw.route,
                graph,
                fragment: raw.fragment,
            }
        })
        .collect();

    // --- 3. Assembly ---
    println!("\nAssembling {} route(s)...", jobs.len());
    let assemble_start = Instant::now();
    let assembler = Assembler::builder(config).build();
    let units: Vec<CompiledUnit> = assembler
        .assemble_all(&jobs)
        .into_iter()
        .map(|result| result.unwrap_or_else(|e| exit_with_error(&e.to_string())))
        .collect();
    let assemble_duration = assemble_start.elapsed();

    for (idx, unit) in units.iter().enumerate() {
        println!(
            "  -> service_{}.py: {} ({} lines, {} packages)",
            idx,
            unit.function_name,
            unit.source_text.lines().count(),
            unit.dependency_manifest.len()
        );
    }

    // --- 4. Output ---
    let write_start = Instant::now();
    Bundle::from_units(&units)
        .and_then(|bundle| bundle.write_to(&cli.output_dir))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write bundle: {}", e)));
    if let Some(path) = &cli.archive {
        CompiledArchive::new(units)
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save archive: {}", e)));
        info!(path = path.display().to_string(); "Archive saved");
    }
    let write_duration = write_start.elapsed();

    // --- 5. Summary ---
    let total_duration = total_start.elapsed();
    println!("\nBundle written to {}", cli.output_dir.display());
    println!("\n--- Performance Summary ---");
    println!("File Loading:         {:?}", load_duration);
    println!("Assembly:             {:?}", assemble_duration);
    println!("Output:               {:?}", write_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_duration);
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
