// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! upcheck - Main Application
//!
//! Command-line front end for the upcheck library. It supports:
//! - Comparing two version strings
//! - Checking an installed version against the release manifest
//! - Listing platforms and their published release information
//! - Building absolute download links for a page origin

mod cli;

use std::io::IsTerminal;
use std::path::Path;
use std::process::exit;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use upcheck::{
    PlatformKey, PlatformMetadata, ReleaseManifest, UpdateCheckResult, UpdateChecker, compare,
};

/// Main application entry point
///
/// Parses command line arguments, loads the manifest once and dispatches to
/// the matching command handler.
fn main() {
    let cli = Cli::parse();

    // Handle completion generation first (exits immediately)
    if cli.completion.is_some() {
        print_bash_completion();
        return;
    }

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(command) => run(command, cli.manifest.as_deref()),
        None => Err(anyhow::anyhow!(
            "upcheck: missing command\nTry 'upcheck --help' for more information."
        )),
    };

    // Handle errors by printing to stderr and exiting with non-zero status
    if let Err(e) = result {
        eprintln!("{e:#}");
        exit(1);
    }
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` enables debug output
/// for this crate and warnings are shown by default.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "upcheck=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn load_manifest(path: Option<&Path>) -> Result<ReleaseManifest> {
    match path {
        Some(path) => ReleaseManifest::load(path)
            .with_context(|| format!("upcheck: cannot use manifest {}", path.display())),
        None => Ok(ReleaseManifest::builtin()),
    }
}

fn run(command: Command, manifest_path: Option<&Path>) -> Result<()> {
    match command {
        // Comparing needs no manifest, so a broken one must not get in the way
        Command::Compare { a, b } => {
            println!("{}", compare(&a, &b));
            Ok(())
        }
        Command::Check {
            platform,
            current_version,
            json,
        } => cmd_check(
            &load_manifest(manifest_path)?,
            &platform,
            &current_version,
            json,
        ),
        Command::Platforms => {
            cmd_platforms(&load_manifest(manifest_path)?);
            Ok(())
        }
        Command::Info { platform, json } => {
            cmd_info(&load_manifest(manifest_path)?, platform.as_deref(), json)
        }
        Command::Link { platform, origin } => {
            cmd_link(&load_manifest(manifest_path)?, &platform, &origin)
        }
    }
}

// =============================================================================
// Command Implementation Functions
// =============================================================================

/// Run an update check and print the result
///
/// A failed check is still printed (as JSON when requested) before the
/// command reports an error, so callers parsing stdout always get a record.
fn cmd_check(
    manifest: &ReleaseManifest,
    platform: &str,
    current_version: &str,
    json: bool,
) -> Result<()> {
    let result = UpdateChecker::new(manifest).check(platform, current_version);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_check_result(&result);
    }

    if !result.success {
        bail!("upcheck: {}", result.message);
    }
    Ok(())
}

fn print_check_result(result: &UpdateCheckResult) {
    let Some(report) = &result.report else {
        return;
    };

    println!("{}", result.message);
    println!("Current version: {}", report.current_version);
    println!("Latest version:  {}", report.latest_version);
    if report.update_available {
        println!("Download:        {} ({})", report.download_url, report.file_size);
        println!("Released:        {}", report.release_date);
        println!("Changelog:       {}", report.changelog);
    }
}

fn cmd_platforms(manifest: &ReleaseManifest) {
    for key in manifest.platforms() {
        println!("{key}\t{}", key.display_name());
    }
}

fn cmd_info(manifest: &ReleaseManifest, platform: Option<&str>, json: bool) -> Result<()> {
    let Some(platform) = platform else {
        if json {
            println!("{}", serde_json::to_string_pretty(manifest)?);
        } else {
            for line in manifest.summary_lines() {
                println!("{line}");
            }
        }
        return Ok(());
    };

    let (key, info) = resolve_platform(manifest, platform)?;

    if json {
        println!("{}", serde_json::to_string_pretty(info)?);
    } else {
        println!("Platform:     {}", key.display_name());
        println!("Version:      {}", info.version);
        println!("Download URL: {}", info.download_url);
        println!("File size:    {}", info.file_size);
        println!("Released:     {}", info.release_date);
        println!("Changelog:    {}", info.changelog);
    }
    Ok(())
}

fn cmd_link(manifest: &ReleaseManifest, platform: &str, origin: &str) -> Result<()> {
    let (_, info) = resolve_platform(manifest, platform)?;
    println!("{}", info.download_link(origin));
    Ok(())
}

/// Look up a platform the manifest publishes, by its command-line key
fn resolve_platform<'m>(
    manifest: &'m ReleaseManifest,
    platform: &str,
) -> Result<(PlatformKey, &'m PlatformMetadata)> {
    let key: PlatformKey = platform.parse().map_err(|e| anyhow::anyhow!("upcheck: {e}"))?;
    match manifest.get(key) {
        Some(info) => Ok((key, info)),
        None => bail!("upcheck: Unknown platform: {platform}"),
    }
}

/// Print bash completion script
fn print_bash_completion() {
    print!(
        r#"# bash completion for upcheck

_upcheck_completions() {{
    local cur prev
    COMPREPLY=()
    cur="${{COMP_WORDS[COMP_CWORD]}}"
    prev="${{COMP_WORDS[COMP_CWORD-1]}}"

    case "${{prev}}" in
        check|info|link)
            COMPREPLY=($(compgen -W "android ios windows" -- "${{cur}}"))
            return
            ;;
        --manifest)
            COMPREPLY=($(compgen -f -- "${{cur}}"))
            return
            ;;
    esac

    if [[ "${{cur}}" == -* ]]; then
        COMPREPLY=($(compgen -W "--completion --help --json --manifest --origin --verbose --version -h -v" -- "${{cur}}"))
    elif ((COMP_CWORD == 1)); then
        COMPREPLY=($(compgen -W "check compare info link platforms" -- "${{cur}}"))
    fi
}}

complete -F _upcheck_completions upcheck
"#
    );
}
