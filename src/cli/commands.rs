use crate::generator::{generate_all, handled_routes};
use crate::model::load_model;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for the exgen code generator.
#[derive(Parser)]
#[command(name = "exgen")]
#[command(about = "Attribute-driven Elixir code generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate Elixir sources from a resolved model document
    Generate {
        /// Path to the resolved model document (YAML or JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Output directory for generated files
        #[arg(short, long, default_value = "generated")]
        output: PathBuf,

        /// Overwrite existing files without prompting
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Restrict entity-mapping generation to one schema module
        #[arg(long)]
        module: Option<String>,
    },
    /// Print the derived route table of every enabled web service
    Routes {
        /// Path to the resolved model document (YAML or JSON)
        #[arg(short, long)]
        model: PathBuf,
    },
}

/// Execute the parsed CLI command.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            model,
            output,
            force,
            module,
        } => {
            let model = load_model(model)?;
            let written = generate_all(&model, output, *force, module.as_deref())?;
            tracing::info!(count = written.len(), "generation complete");
            Ok(())
        }
        Commands::Routes { model } => {
            let model = load_model(model)?;
            for module in &model.modules {
                for service in &module.services {
                    if !service.server_enabled {
                        continue;
                    }
                    println!("{}.{}:", module.name, service.name);
                    for route in handled_routes(module, service) {
                        println!("  {} → {}", route.uri, route.module);
                    }
                }
            }
            Ok(())
        }
    }
}
