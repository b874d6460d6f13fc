//! Command-line argument definitions for the Shoreline CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global flags select the configuration file, the data
//! directory and logging verbosity; each [`Command`] maps to one part of the
//! guide.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use shoreline::{export::DEFAULT_EXPORT_NAME, tour::TourStep};
use shoreline_core::catalog::{GALLERY_LIMIT, ZoneFilter};

/// Command-line arguments for the Shoreline beach guide
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding feedback and the visit counter
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List beaches, optionally for one zone
    Beaches {
        /// ALL, NORTH, SOUTH, EAST or WEST
        #[arg(short, long, default_value = "ALL")]
        zone: ZoneFilter,
    },

    /// List gallery image URLs
    Gallery {
        #[arg(short, long, default_value_t = GALLERY_LIMIT)]
        limit: usize,
    },

    /// List the page's sections
    Sections,

    /// Submit or read visitor feedback
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },

    /// Count a page view and print the total
    Visit,

    /// Write the guide as a Word-compatible document
    Export {
        #[arg(short, long, default_value = DEFAULT_EXPORT_NAME)]
        output: PathBuf,
    },

    /// Walk the page and report the highlighted section after each step
    Tour {
        /// Section ids to navigate to, or `@<offset>` to scroll to a position
        steps: Vec<TourStep>,
    },

    /// Print the footer ticker line
    Ticker {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FeedbackAction {
    /// Store a new feedback entry
    Submit {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,
    },

    /// Show the most recent entries
    List {
        /// Show every entry instead of the most recent
        #[arg(long)]
        all: bool,
    },
}
