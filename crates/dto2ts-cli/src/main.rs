//! dto2ts CLI - TypeScript declarations from Java class graphs
//!
//! Commands:
//! - `dto2ts generate` - Generate declarations for root classes
//! - `dto2ts check` - Validate a class graph file
//! - `dto2ts list-dtos` - List project classes that look like data classes
//! - `dto2ts init-config` - Write a settings file with the defaults

use anyhow::Result;
use clap::{Parser, Subcommand};
use dto2ts_core::{GenerateError, LogLevel};
use std::path::PathBuf;

mod check;
mod generate;
mod list;
mod settings;

use settings::Settings;

#[derive(Parser)]
#[command(name = "dto2ts")]
#[command(author, version, about = "Generate TypeScript declarations from Java data classes", long_about = None)]
struct Cli {
    /// Log verbosity (trace, debug, info, warn, error, off)
    #[arg(long, global = true, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript declarations
    Generate {
        /// Path to the class graph JSON
        #[arg(short, long)]
        graph: PathBuf,

        /// Qualified name of a root class (repeatable)
        #[arg(short, long = "class", required_unless_present = "method", conflicts_with = "method")]
        classes: Vec<String>,

        /// Use the data classes in a method signature as roots (`com.acme.Api#create`)
        #[arg(short, long)]
        method: Option<String>,

        /// Path to a dto2ts.toml settings file
        #[arg(short = 'C', long)]
        config: Option<PathBuf>,

        /// Output directory, or a `.ts` file for a single or merged document
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing files
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Merge all documents into one
        #[arg(long)]
        merge: bool,
    },

    /// Validate a class graph file
    Check {
        /// Path to the class graph JSON
        #[arg(short, long)]
        graph: PathBuf,
    },

    /// List project classes accepted as data classes
    ListDtos {
        /// Path to the class graph JSON
        #[arg(short, long)]
        graph: PathBuf,

        /// Path to a dto2ts.toml settings file
        #[arg(short = 'C', long)]
        config: Option<PathBuf>,
    },

    /// Write a settings file with the default values
    InitConfig {
        /// Destination (default: ./dto2ts.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    value.parse().map_err(|e: GenerateError| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.command {
        Commands::Generate { config, .. } | Commands::ListDtos { config, .. } => config.clone(),
        _ => None,
    };
    let settings = Settings::load(config_path.as_deref())?;
    let level = match cli.log_level {
        Some(level) => level,
        None => settings.log_level()?.unwrap_or(LogLevel::Warn),
    };
    dto2ts_logging::init_logging(level)?;

    match cli.command {
        Commands::Generate {
            graph,
            classes,
            method,
            output,
            stdout,
            merge,
            ..
        } => {
            let args = generate::GenerateArgs {
                graph,
                classes,
                method,
                output,
                stdout,
                merge,
            };
            generate::run(&args, &settings)?;
        }
        Commands::Check { graph } => {
            check::run(&graph)?;
        }
        Commands::ListDtos { graph, .. } => {
            list::run(&graph, &settings)?;
        }
        Commands::InitConfig { output, force } => {
            settings::init(output, force)?;
        }
    }

    Ok(())
}
