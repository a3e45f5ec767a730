use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;

use doclink::config::{load_config, ConverterConfig, CONFIG_FILENAME};
use doclink::converter::{Converter, PluginRegistry};
use doclink::errors::{DocLinkError, Result};
use doclink::graph::format_hierarchy;
use doclink::project::Project;

/// Links type references and builds inheritance hierarchies in a declaration graph.
#[derive(Parser)]
#[command(name = "doclink", about = "Type reference linking for documentation projects")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a project document and write the linked result
    Resolve {
        /// Project JSON file
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Configuration file (default: ./doclink.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the hierarchy of one declaration after resolution
    Hierarchy {
        /// Project JSON file
        input: PathBuf,
        /// Top-level declaration name (dotted for nested ones)
        name: String,
        /// Configuration file (default: ./doclink.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Resolve {
            input,
            output,
            config,
        } => {
            let config = resolve_config(config)?;
            let project = load_and_resolve(&input, &config)?;
            let json = project.to_json(config.pretty)?;
            match output {
                Some(path) => fs::write(&path, json)?,
                None => println!("{}", json),
            }
        }
        Commands::Hierarchy {
            input,
            name,
            config,
        } => {
            let config = resolve_config(config)?;
            let project = load_and_resolve(&input, &config)?;
            let decl = project
                .find_global(&name)
                .and_then(|id| project.get(id))
                .ok_or_else(|| DocLinkError::Model {
                    message: format!("no declaration named '{}'", name),
                })?;
            print!("{}", format_hierarchy(&project, decl));
        }
    }
    Ok(())
}

/// Loads the given configuration, or `./doclink.json` when none is given.
fn resolve_config(path: Option<PathBuf>) -> Result<ConverterConfig> {
    let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    load_config(&path)
}

fn load_and_resolve(input: &Path, config: &ConverterConfig) -> Result<Project> {
    let json = fs::read_to_string(input)?;
    let mut project = Project::from_json(&json)?;
    let registry = PluginRegistry::with_defaults();
    let mut converter = Converter::from_config(&registry, config)?;
    converter.resolve(&mut project)?;
    Ok(project)
}
