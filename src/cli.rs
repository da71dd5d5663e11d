// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// CLI argument definitions for upcheck
//
// Separated from main.rs so that build.rs can include this file
// to generate the man page via clap_mangen.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI argument parser
#[derive(Parser)]
#[command(
    name = "upcheck",
    version,
    about = "Release metadata and update checks for app downloads",
    disable_version_flag = true
)]
#[command(arg(clap::Arg::new("version").long("version").action(clap::ArgAction::Version).help("Print version")))]
pub struct Cli {
    /// Release manifest (JSON) to use instead of the built-in table
    #[arg(long = "manifest", value_name = "PATH", global = true)]
    pub manifest: Option<PathBuf>,

    /// Make the operation more talkative
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Generate shell completion script (only bash is supported currently)
    #[arg(long = "completion", value_name = "SHELL", value_parser = parse_completion_shell)]
    pub completion: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two versions and print -1, 0 or 1
    Compare {
        #[arg(value_name = "A")]
        a: String,
        #[arg(value_name = "B")]
        b: String,
    },

    /// Check whether a newer version is published for a platform
    Check {
        /// Platform key (android, ios or windows)
        #[arg(value_name = "PLATFORM")]
        platform: String,
        /// Currently installed version
        #[arg(value_name = "CURRENT_VERSION")]
        current_version: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the platforms published by the manifest
    Platforms,

    /// Show release information for all platforms or a single one
    Info {
        #[arg(value_name = "PLATFORM")]
        platform: Option<String>,
        /// Print the information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the absolute download link for a platform
    Link {
        #[arg(value_name = "PLATFORM")]
        platform: String,
        /// Origin the download page is served from (e.g. https://example.org)
        #[arg(long, value_name = "URL")]
        origin: String,
    },
}

fn parse_completion_shell(s: &str) -> Result<String, String> {
    match s.to_lowercase().as_str() {
        "bash" => Ok(s.to_lowercase()),
        _ => Err(format!("unsupported shell: {s} (only 'bash' is supported)")),
    }
}
