//! tbgen CLI — the main entry point.
//!
//! Commands:
//! - `init`      — Create config and a starter template
//! - `templates` — List the template catalog
//! - `context`   — Build and export the testbench context JSON
//! - `render`    — Render a template into `{name}_tb.<ext>`
//! - `config`    — Show the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "tbgen",
    about = "tbgen — UVM testbench generator",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.tbgen/config.toml)
    #[arg(long, global = true, env = "TBGEN_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the config file and a starter template directory
    Init,

    /// List available templates
    Templates,

    /// Build the testbench context from a session file and export it as JSON
    Context {
        /// Session JSON with `name`, `existing_agents`, `new_agents`
        #[arg(short, long)]
        input: PathBuf,

        /// Override the testbench name
        #[arg(short, long)]
        name: Option<String>,

        /// Output file or directory (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render a template against a session or an exported context
    Render {
        /// Session JSON with `name`, `existing_agents`, `new_agents`
        #[arg(short, long, required_unless_present = "context", conflicts_with = "context")]
        input: Option<PathBuf>,

        /// Previously exported context JSON
        #[arg(long)]
        context: Option<PathBuf>,

        /// Template name (defaults to the configured template)
        #[arg(short, long)]
        template: Option<String>,

        /// Override the testbench name (session input only)
        #[arg(short, long, conflicts_with = "context")]
        name: Option<String>,

        /// Write `{name}_tb.<ext>` into this directory instead of stdout
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Print failures as a JSON report
        #[arg(long)]
        json_errors: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing. Logs go to stderr so rendered text on stdout stays clean.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init => commands::init::run(config_path)?,
        Commands::Templates => commands::templates::run(config_path)?,
        Commands::Context { input, name, out } => {
            commands::context::run(config_path, &input, name, out.as_deref())?
        }
        Commands::Render {
            input,
            context,
            template,
            name,
            out_dir,
            json_errors,
        } => commands::render::run(
            config_path,
            commands::render::Source::from_args(input, context, name)?,
            template.as_deref(),
            out_dir.as_deref(),
            json_errors,
        )?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(config_path)?,
            ConfigAction::Path => commands::config_cmd::path(config_path)?,
        },
    }

    Ok(())
}
