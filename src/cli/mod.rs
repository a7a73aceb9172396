//! CLI command definitions for envspec
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::config::{Coercions, Loader, ProjectLayout};
use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(s)
        .ok_or_else(|| format!("unknown format '{}' (expected text, json or markdown)", s))
}

/// Resolve typed configuration from environment variables, env files and defaults
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Options YAML file (flat mapping). Defaults to the scoped config/envspec.yml
    #[arg(short, long, global = true, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Env file to merge, later files win (repeatable). Defaults to .env and .env.<environment>
    #[arg(short = 'e', long = "env-file", global = true, value_name = "FILE")]
    pub env_files: Vec<PathBuf>,

    /// Application root (overrides ENVSPEC_ROOT)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Environment name (overrides ENVSPEC_ENV)
    #[arg(long, global = true, value_name = "NAME")]
    pub environment: Option<String>,

    /// Coerce `minutes` variables to durations instead of seconds
    #[arg(long, global = true)]
    pub durations: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load and validate the configuration
    Check,

    /// Print the value of one variable
    Get {
        /// Variable name
        name: String,
    },

    /// Print every resolved variable
    Dump {
        /// Output format: text (default), json or markdown (md)
        #[arg(short, long, default_value = "text", value_parser = parse_output_format)]
        format: OutputFormat,
    },

    /// Print KEY=value lines for seeding an environment
    Export,
}

impl Cli {
    /// Project layout after applying `--root` and `--environment`.
    pub fn layout(&self) -> ProjectLayout {
        let mut layout = ProjectLayout::discover();
        if let Some(ref root) = self.root {
            layout = layout.with_root(root.clone());
        }
        if let Some(ref environment) = self.environment {
            layout = layout.with_environment(environment.clone());
        }
        layout
    }

    /// Loader for the options and env files selected on the command line.
    pub fn loader(&self) -> Loader {
        let layout = self.layout();
        let loader = match self.options {
            Some(ref path) => Loader::new(path.clone()).env_files(layout.env_files()),
            None => layout.loader(),
        };
        let loader = if self.env_files.is_empty() {
            loader
        } else {
            loader.env_files(self.env_files.clone())
        };
        if self.durations {
            loader.coercions(Coercions::with_durations())
        } else {
            loader
        }
    }
}
