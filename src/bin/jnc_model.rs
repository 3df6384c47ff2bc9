//! JNC Model CLI
//!
//! Loads an annotated schema tree from JSON, compiles one module and prints
//! the class model and tree metadata as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jnc_codegen::{Compiler, CompilerConfig, SchemaTree};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jnc-model")]
#[command(about = "Compile an annotated YANG schema tree into a JNC class model")]
struct Cli {
    /// Schema tree in JSON form
    tree: PathBuf,

    /// Module to compile
    #[arg(short, long)]
    module: String,

    /// Config file (defaults to jnc.toml lookup)
    #[arg(short, long)]
    config: Option<String>,

    /// Skip the class model
    #[arg(long)]
    no_classes: bool,

    /// Skip the tree metadata
    #[arg(long)]
    no_schema: bool,

    /// Do not compile the modules the module augments
    #[arg(long)]
    no_augmented: bool,

    /// Write the JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jnc_codegen=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = CompilerConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.no_classes {
        config.generation.classes = false;
    }
    if cli.no_schema {
        config.generation.schema = false;
    }

    let json = std::fs::read_to_string(&cli.tree).with_context(|| format!("Failed to read {}", cli.tree.display()))?;
    let tree = SchemaTree::from_json(&json).with_context(|| format!("Failed to load {}", cli.tree.display()))?;

    let mut compiler = Compiler::new(config);
    let compiled = if cli.no_augmented {
        let module = tree
            .module_by_name(&cli.module)
            .with_context(|| format!("Module not found: {}", cli.module))?;
        vec![compiler.compile(&tree, module)?]
    } else {
        compiler.compile_named(&tree, &cli.module)?
    };

    let diagnostics = compiler.diagnostics();
    if !diagnostics.is_empty() {
        eprintln!("{}", diagnostics.format_all());
    }
    info!(
        modules = compiled.len(),
        warnings = diagnostics.warning_count(),
        "Compilation finished"
    );

    let rendered = serde_json::to_string_pretty(&compiled)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Model written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
