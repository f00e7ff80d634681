//! CLI module - Command-line interface for Marquee
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Marquee - movie search and SEO landing pages
#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default)
    #[command(alias = "-d", alias = "--daemon", alias = "daemon")]
    Serve,

    /// Search the metadata service like the navbar box does
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,

        /// Select the N-th result (1-based) and print its canonical path
        #[arg(long)]
        pick: Option<usize>,
    },

    /// Load and print the navbar years menu
    #[command(alias = "y")]
    Years,

    /// Print the landing page sitemap
    Sitemap,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
