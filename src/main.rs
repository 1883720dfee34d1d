//! arti CLI entrypoint
//! Parses command-line arguments, loads the requested template and generates it.
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use arti::core::{
    Generator, collect_variables,
    templates::TemplateLoader,
    variables::Builtins,
};
use clap::Parser;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arti")]
#[command(about = "Artichoke Template Generator", long_about = None)]
#[command(disable_version_flag = true, arg_required_else_help = true)]
struct Cli {
    /// Specifies the template to use
    #[arg(short, long)]
    template: Option<String>,
    /// Specifies the name of the project or file to be generated
    #[arg(short, long)]
    name: Option<String>,
    /// Variable definition for template substitution, as key[=value]
    #[arg(short, long = "define", num_args = 1..)]
    define: Vec<String>,
    /// Directory to generate into (defaults to the current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// Runs program on CLI interactive mode
    #[arg(short, long)]
    interactive: bool,
    /// Prints the program version information
    #[arg(short, long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging from RUST_LOG, defaulting to INFO
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed arguments");

    if cli.version {
        print_version();
        return Ok(());
    }

    if cli.interactive {
        anyhow::bail!("Interactive TUI not implemented yet!");
    }

    let template_name = cli
        .template
        .as_deref()
        .context("Template parameter is required")?;

    let loader = TemplateLoader::from_env()?;
    debug!(config_dir = %loader.config_dir().display(), "Using configuration directory");
    let template = loader
        .load(template_name)
        .with_context(|| format!("Error loading the template '{template_name}'"))?;

    let builtins = Builtins::current()?;
    let vars = collect_variables(&template, &builtins, cli.name.as_deref(), &cli.define)?;
    let output_dir = cli.output_dir.unwrap_or_else(|| builtins.cwd.clone());

    let generator = Generator::new(template, vars, output_dir);
    info!(
        template = %template_name,
        output_dir = %generator.output_dir().display(),
        "Generating template"
    );
    let report = generator.run()?;

    println!(
        "Generated '{}' into '{}': {} created, {} skipped",
        template_name,
        generator.output_dir().display(),
        report.created.len(),
        report.skipped.len()
    );
    for path in &report.created {
        println!("  + {}", path.display());
    }
    Ok(())
}

fn print_version() {
    println!(
        "{} version {}\n\n{}\n\nAuthors: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_AUTHORS").replace(':', ", ")
    );
}
