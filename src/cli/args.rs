//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build the page index, sitemap and link graph for local SEO pages
#[derive(Parser, Debug)]
#[command(name = "seo-atlas")]
#[command(about = "Build the page index, sitemap and link graph for local SEO pages")]
#[command(version)]
pub struct Args {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Where configuration and source data come from
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Config file path (defaults to ./seo-atlas.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Data directory with locations, services.json and vehicles.json
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the index and write sitemap.xml, paths.json, index.json and stats.txt
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Absolute site origin used in the sitemap
        #[arg(long)]
        base_url: Option<String>,

        /// Leave pages below this priority out of the sitemap
        #[arg(long)]
        min_priority: Option<u8>,
    },

    /// Print build statistics
    Stats {
        #[command(flatten)]
        source: SourceArgs,

        /// Count pages at or above this priority
        #[arg(long)]
        min_priority: Option<u8>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a URL slug to its page
    Route {
        /// Slug to resolve, with or without leading slash
        slug: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show breadcrumbs and internal links of a page
    Links {
        /// Slug of the page
        slug: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the source data for integrity problems
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show version information
    Version,
}
