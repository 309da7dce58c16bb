// src/cli.rs
//! CLI definitions for the mavforge recipe tool
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mavforge")]
#[command(version)]
#[command(about = "Fetch, patch, build and package MAVSDK against external dependencies", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: fetch, patch, configure, build, export
    Build {
        /// Recipe version (1.4 or 2)
        #[arg(short, long, default_value = "1.4")]
        recipe: String,

        /// Work directory for the source and build trees
        #[arg(short, long)]
        workdir: String,

        /// Output directory for the exported package
        #[arg(short, long)]
        output: String,

        /// Directory for cached source archives
        #[arg(long)]
        source_cache: Option<String>,

        /// Build shared libraries instead of static
        #[arg(long)]
        shared: bool,

        /// Disable position-independent code for static builds
        #[arg(long)]
        no_pic: bool,

        /// Target operating system (linux, windows, macos; default: host)
        #[arg(long)]
        target_os: Option<String>,

        /// Compiler family (gcc, clang, msvc; default: per target OS)
        #[arg(long)]
        compiler: Option<String>,

        /// MSVC runtime string (MT, MTd, MD, MDd)
        #[arg(long)]
        runtime: Option<String>,
    },

    /// Apply a recipe's patch catalog to an existing source tree
    Patch {
        /// Recipe version (1.4 or 2)
        #[arg(short, long, default_value = "1.4")]
        recipe: String,

        /// Root of the source tree to patch
        root: String,

        /// Show unified diffs instead of writing changes
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the plugin manifest for a recipe version
    Manifest {
        /// Recipe version (1.4 or 2)
        #[arg(short, long, default_value = "1.4")]
        recipe: String,

        /// Target operating system for the system-library list
        #[arg(long, default_value = "linux")]
        target_os: String,

        /// Emit JSON instead of a readable listing
        #[arg(long)]
        json: bool,
    },

    /// Print the external dependency version ranges for a recipe version
    Deps {
        /// Recipe version (1.4 or 2)
        #[arg(short, long, default_value = "1.4")]
        recipe: String,
    },
}
