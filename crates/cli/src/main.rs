use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use impact_analyzer::{AnalyzerConfig, AssembledGraph, CodeAnalyzer};
use impact_discovery::FileScanner;
use impact_store::{load_graph, MemoryGraphStore};
use std::fs;
use std::path::{Path, PathBuf};

mod report;

use report::ImpactReport;

#[derive(Parser)]
#[command(name = "impact")]
#[command(about = "Build a code dependency graph for impact analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a project and emit the dependency graph as JSON
    Analyze(AnalyzeArgs),

    /// Query forward/reverse call impact for a symbol
    Query(QueryArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Python project directory or single file to analyze
    #[arg(long)]
    path: PathBuf,

    /// Write the graph JSON to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    excludes: ExcludeArgs,
}

#[derive(Args)]
struct QueryArgs {
    /// Python project directory or single file to analyze
    #[arg(long)]
    path: PathBuf,

    /// Qualified identity to inspect (e.g. "UserService.create_user")
    #[arg(long)]
    symbol: String,

    /// Maximum hop count
    #[arg(long, default_value_t = 2)]
    depth: usize,

    /// Which direction to walk the call graph
    #[arg(long, value_enum, default_value = "both")]
    direction: QueryDirection,

    #[command(flatten)]
    excludes: ExcludeArgs,
}

#[derive(Args)]
struct ExcludeArgs {
    /// Extra module names to treat as external
    #[arg(long = "exclude-module", value_name = "MODULE")]
    exclude_modules: Vec<String>,

    /// Extra call-target names to treat as external
    #[arg(long = "exclude-name", value_name = "NAME")]
    exclude_names: Vec<String>,

    /// Start from empty exclusion sets instead of the built-in defaults
    #[arg(long)]
    no_default_excludes: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum QueryDirection {
    Callers,
    Callees,
    Both,
}

impl ExcludeArgs {
    fn to_config(&self) -> AnalyzerConfig {
        let mut config = if self.no_default_excludes {
            AnalyzerConfig::keep_all()
        } else {
            AnalyzerConfig::default()
        };
        for module in &self.exclude_modules {
            config = config.exclude_module(module);
        }
        for name in &self.exclude_names {
            config = config.exclude_name(name);
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Analyze(args) => run_analyze(args),
        Commands::Query(args) => run_query(args),
    }
}

fn build_graph(path: &Path, config: AnalyzerConfig) -> Result<AssembledGraph> {
    let files = FileScanner::new(path)
        .scan()
        .with_context(|| format!("scanning {}", path.display()))?;
    let graph = CodeAnalyzer::new(config).analyze(&files);

    for (file, error) in &graph.stats.failures {
        log::warn!("Failed to analyze {file}: {error}");
    }
    Ok(graph)
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let graph = build_graph(&args.path, args.excludes.to_config())?;

    let json = serde_json::to_string_pretty(&graph)?;
    match args.output {
        Some(output) => {
            fs::write(&output, json)
                .with_context(|| format!("writing {}", output.display()))?;
            log::info!(
                "Wrote {} nodes and {} edges to {}",
                graph.stats.nodes,
                graph.stats.edges,
                output.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_query(args: QueryArgs) -> Result<()> {
    let graph = build_graph(&args.path, args.excludes.to_config())?;

    let mut store = MemoryGraphStore::new();
    let load = load_graph(&mut store, &graph.nodes, &graph.edges);
    log::debug!(
        "Loaded {} nodes, {} edges ({} rejected at the boundary)",
        load.nodes_loaded,
        load.edges_loaded,
        load.rejected.len()
    );

    let callers = match args.direction {
        QueryDirection::Callers | QueryDirection::Both => {
            Some(store.callers_within(&args.symbol, args.depth)?)
        }
        QueryDirection::Callees => None,
    };
    let callees = match args.direction {
        QueryDirection::Callees | QueryDirection::Both => {
            Some(store.callees_within(&args.symbol, args.depth)?)
        }
        QueryDirection::Callers => None,
    };

    let report = ImpactReport {
        symbol: args.symbol,
        depth: args.depth,
        callers,
        callees,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
