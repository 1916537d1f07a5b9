//! Command-line interface for abi-export.
//!
//! With no subcommand the export runs with the resolved configuration,
//! so a bare `abi-export` in a project root behaves like the classic
//! build/contracts -> abi script.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::{self, ConfigOverrides, ResolvedConfig};
use crate::core::Converter;

/// abi-export - Extract contract ABIs from build artifacts
#[derive(Parser, Debug)]
#[command(name = "abi-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Path overrides shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// Directory of build artifacts [default: ./build/contracts/]
    #[arg(short, long, env = "ABI_EXPORT_INPUT", global = true)]
    pub input: Option<PathBuf>,

    /// Directory to write ABI files to [default: ./abi/]
    #[arg(short, long, env = "ABI_EXPORT_OUTPUT", global = true)]
    pub output: Option<PathBuf>,
}

impl From<PathArgs> for ConfigOverrides {
    fn from(args: PathArgs) -> Self {
        Self {
            input_dir: args.input,
            output_dir: args.output,
        }
    }
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Extract the ABI of every artifact (default)
    Export,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let resolved = config::load_config(self.paths.into())?;

        match self.command.unwrap_or(Commands::Export) {
            Commands::Export => export(&resolved).await,
            Commands::Config => {
                show_config(&resolved);
                Ok(())
            }
        }
    }
}

/// Run the export and print a summary
async fn export(resolved: &ResolvedConfig) -> Result<()> {
    let converter = Converter::new(resolved.export.clone());

    let report = converter.convert().await.with_context(|| {
        format!(
            "Failed to export ABIs from {}",
            resolved.export.input_dir.display()
        )
    })?;

    println!(
        "Exported {} ABI file(s) to {}",
        report.len(),
        resolved.export.output_dir.display()
    );

    Ok(())
}

fn show_config(resolved: &ResolvedConfig) {
    println!("abi-export configuration");
    println!();
    println!(
        "Config file: {}",
        resolved
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Input (artifacts): {}", resolved.export.input_dir.display());
    println!("  Output (ABIs):     {}", resolved.export.output_dir.display());
}
