//! bspgen CLI
//!
//! Usage:
//!   bspgen [OPTIONS] [TARGET]
//!
//! Options:
//!   -o, --output <FILE>         Output file [default: bsp_mycpu.c]
//!   -r, --registry <FILE>       Registry file (TOML format)
//!   -t, --templates-dir <DIR>   Base directory for template paths
//!   -v, --verbose               Debug logging on stderr
//!   -h, --help                  Print help

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bspgen::{generate, list_targets, GenerationRequest, GeneratorConfig, DEFAULT_OUTPUT};

#[derive(Parser)]
#[command(name = "bspgen")]
#[command(about = "KDOS BSP generator")]
struct Cli {
    /// Target controller identifier (lists supported controllers if omitted)
    target: Option<String>,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Registry file mapping controllers to templates (TOML format)
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// Base directory for relative template paths
    #[arg(short, long)]
    templates_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = GeneratorConfig::new()
        .with_registry_file(cli.registry)
        .with_templates_dir(cli.templates_dir);

    let registry = match config.load_registry() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading registry: {}", e);
            std::process::exit(1);
        }
    };

    // An empty target counts as omitted
    let Some(target) = cli.target.filter(|t| !t.is_empty()) else {
        if let Err(e) = list_targets(&registry, &mut io::stdout().lock()) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    };

    let request = GenerationRequest::new(target).with_output(cli.output);
    match generate(&registry, &request) {
        Ok(generated) => println!("{}", generated),
        // Unsupported targets are reported but still exit successfully
        Err(e) if e.is_unsupported() => println!("{}", e),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
