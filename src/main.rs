//! apigen CLI entrypoint
//! Parses command-line arguments and runs the generation pipeline.
#![deny(unsafe_code)]

use std::fs;
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use apigen::generation::build_api_context;
use apigen::renderer::render_api;

#[derive(Parser)]
#[command(name = "apigen")]
#[command(author, version, about = "Generate Actix Web server scaffolding from an OpenAPI document", long_about = None)]
struct Cli {
    /// OpenAPI document to generate from (YAML or JSON)
    spec: PathBuf,

    /// File to write the generated module to (stdout when omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.spec)
        .with_context(|| format!("could not read spec file `{}`", cli.spec.display()))?;
    let doc: serde_json::Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("could not parse spec file `{}`", cli.spec.display()))?;

    let api = build_api_context(&doc)?;
    info!(
        models = api.models.len(),
        errors = api.errors.len(),
        methods = api.methods.len(),
        providers = api.providers.len(),
        "document resolved"
    );

    let rendered = render_api(&api)?;
    match &cli.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("could not write `{}`", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(())
}
