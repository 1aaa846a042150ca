//! Command-line interface for pajelingo.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pajelingo - game rounds, scores and badges for language games
#[derive(Parser, Debug)]
#[command(name = "pajelingo")]
#[command(about = "Game-round, score and badge server for language games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Apply pending database migrations
    Migrate,

    /// Load a TOML content pack into the database
    Seed {
        /// Path to the content pack
        path: PathBuf,
    },

    /// Print the leaderboard
    Rankings {
        /// Restrict to one language
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Print the badges a user holds
    Badges {
        /// User display name
        user: String,
    },

    /// List the languages in the content store
    Languages,

    /// Print the rounds a user has set up but not yet answered
    Pending {
        /// User display name
        user: String,
    },
}
