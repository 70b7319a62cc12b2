//! Command-line argument definitions for the TaskData mapper
//!
//! This module defines the CLI interface using the clap derive API. Both
//! subcommands operate on a JSON bundle holding a canonical model, identifier
//! links and a parsed TaskData document.

use crate::constants::{EXPORTED_BUNDLE_EXTENSION, IMPORTED_BUNDLE_EXTENSION};
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the TaskData mapper
///
/// Converts ISO 11783-10 TaskData tasks to and from a canonical agricultural
/// operations model.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskdata-mapper",
    version,
    about = "Convert ISO 11783-10 TaskData tasks to and from a canonical operations model",
    long_about = "Imports the tasks of a parsed TaskData document into a canonical model as work \
                  items and logged data records, or exports the work items and logged data of a \
                  canonical model as TaskData tasks. Identifier links are kept in the bundle so \
                  later conversions reuse the same document ids."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import the bundle's TaskData tasks into its canonical model
    Import(ConvertArgs),
    /// Export the bundle's canonical model as TaskData tasks
    Export(ConvertArgs),
}

/// Arguments shared by the import and export commands
#[derive(Debug, Clone, ClapArgs)]
pub struct ConvertArgs {
    /// Bundle file to convert
    ///
    /// JSON document with `model`, `links` and `task_data` sections. Missing
    /// sections are treated as empty.
    #[arg(value_name = "BUNDLE", help = "Bundle file to convert (JSON)")]
    pub input_path: PathBuf,

    /// Output path for the updated bundle
    ///
    /// Defaults to the input path with an `.imported.json` or
    /// `.exported.json` extension.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output path for the updated bundle"
    )]
    pub output_path: Option<PathBuf>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// ISOBUS DDI export merged over the built-in dictionary
    #[arg(
        long = "ddi-export",
        value_name = "FILE",
        help = "ISOBUS data dictionary export to merge over the built-in DDIs"
    )]
    pub ddi_export: Option<PathBuf>,

    /// Fail on the first stage error instead of degrading the stage
    #[arg(long = "strict", help = "Fail instead of degrading failed mapping stages")]
    pub strict: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Commands {
    /// Arguments of either subcommand
    pub fn convert_args(&self) -> &ConvertArgs {
        match self {
            Self::Import(args) | Self::Export(args) => args,
        }
    }

    /// Extension of the default output file
    pub fn output_extension(&self) -> &'static str {
        match self {
            Self::Import(_) => IMPORTED_BUNDLE_EXTENSION,
            Self::Export(_) => EXPORTED_BUNDLE_EXTENSION,
        }
    }

    /// Where the updated bundle is written
    pub fn output_path(&self) -> PathBuf {
        let args = self.convert_args();
        args.output_path
            .clone()
            .unwrap_or_else(|| args.input_path.with_extension(self.output_extension()))
    }
}

impl ConvertArgs {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.is_file() {
            return Err(Error::configuration(format!(
                "Input bundle does not exist: {}",
                self.input_path.display()
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(ddi_export) = &self.ddi_export {
            if !ddi_export.exists() {
                return Err(Error::configuration(format!(
                    "DDI export does not exist: {}",
                    ddi_export.display()
                )));
            }
        }

        if self.output_path.as_ref() == Some(&self.input_path) {
            return Err(Error::configuration(
                "Output path must differ from the input bundle".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the logging level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
