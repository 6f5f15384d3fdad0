//! Command-line interface definitions for folio

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the folio application
#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Academic portfolio site generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for folio
#[derive(Subcommand)]
pub enum Commands {
    /// Create folio.toml and starter content files
    Init {
        /// Directory to initialize (defaults to current directory)
        path: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Site owner's name
        #[arg(short, long, default_value = "Your Name")]
        name: String,
    },

    /// Build the portfolio page
    Build {
        /// Site directory (defaults to current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        input: PathBuf,

        /// Output HTML file
        #[arg(short, long, default_value = "index.html")]
        output: PathBuf,

        /// Viewport width used for the initial page state
        #[arg(long, value_name = "PX")]
        viewport_width: Option<u32>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Load and check content without writing output
    Validate {
        /// Site directory (defaults to current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        input: PathBuf,

        /// Show detailed validation results
        #[arg(short, long)]
        verbose: bool,
    },

    /// Replay a script of page events and print the state after each one
    Simulate {
        /// Event script, one event per line
        script: PathBuf,

        /// Site directory (defaults to current directory)
        #[arg(short, long, value_name = "PATH", default_value = ".")]
        input: PathBuf,

        /// Viewport width reported before the first event
        #[arg(long, value_name = "PX")]
        viewport_width: Option<u32>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the configured navigation sections
    ListSections {
        /// Site directory (defaults to current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        input: PathBuf,
    },
}
