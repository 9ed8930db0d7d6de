//! dupfind - duplicate file finder
//!
//! Finds files with identical content under a directory tree. Candidates are
//! first bucketed by size; only files that share a size are hashed with
//! SHA-256, and files with equal digests form a duplicate group. A second
//! mode lists every copy of a single reference file.
//!
//! The library is usable on its own:
//!
//! ```no_run
//! use std::path::Path;
//!
//! let records = dupfind::scanner::scan(Path::new("/data")).unwrap();
//! let groups = dupfind::duplicates::group(records).unwrap();
//! for group in &groups {
//!     println!("{} copies of {}", group.len(), group.digest);
//! }
//! ```

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod scanner;
pub mod session;

use anyhow::{bail, Context, Result};
use std::io::{self, Write};

use crate::actions::FsRemover;
use crate::cli::{Cli, Commands, FindArgs, GroupArgs, OutputFormat};
use crate::config::Config;
use crate::duplicates::DuplicateFinder;
use crate::error::ExitCode;
use crate::output::{text, JsonOutput, JsonSearchOutput};
use crate::prompt::{run_removal_loop, PromptOutcome};
use crate::session::RemovalSession;

/// Run the command described by `cli` and pick the process exit code.
///
/// # Errors
///
/// Returns an error for invalid input paths, configuration problems, a fatal
/// filesystem failure under the abort policy, or a broken stdout.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref())?.with_cli(cli.command.common());
    log::debug!("Effective configuration: {config:?}");

    match &cli.command {
        Commands::Group(args) => run_group(args, &config),
        Commands::Find(args) => run_find(args, &config),
    }
}

fn run_group(args: &GroupArgs, config: &Config) -> Result<ExitCode> {
    let finder = DuplicateFinder::new(config.finder_config());
    let (groups, stats) = finder
        .find_duplicates(&args.path)
        .with_context(|| format!("Failed to group files under {}", args.path.display()))?;

    if stats.is_partial() {
        log::warn!(
            "{} entries could not be read and were left out",
            stats.scan_errors.len() + stats.skipped.len()
        );
    }

    let exit_code = ExitCode::for_outcome(!groups.is_empty(), stats.is_partial());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.output {
        OutputFormat::Text => {
            text::write_groups(&groups, &mut out)?;
            if groups.is_empty() {
                log::info!("No duplicates found");
            }
        }
        OutputFormat::Json => JsonOutput::new(&groups, &stats, exit_code).write_to(&mut out)?,
    }
    out.flush()?;

    Ok(exit_code)
}

fn run_find(args: &FindArgs, config: &Config) -> Result<ExitCode> {
    if args.remove && config.output == OutputFormat::Json {
        bail!("--remove cannot be combined with JSON output");
    }

    let finder = DuplicateFinder::new(config.finder_config());
    let outcome = finder
        .find_duplicates_of(&args.file, &args.path)
        .with_context(|| {
            format!(
                "Failed to search {} for copies of {}",
                args.path.display(),
                args.file.display()
            )
        })?;

    let exit_code = ExitCode::for_outcome(!outcome.matches.is_empty(), !outcome.skipped.is_empty());

    let stdout = io::stdout();
    if config.output == OutputFormat::Json {
        let mut out = stdout.lock();
        JsonSearchOutput::new(&outcome).write_to(&mut out)?;
        out.flush()?;
        return Ok(exit_code);
    }

    if !args.remove {
        let mut out = stdout.lock();
        text::write_copies(&outcome.matches, &mut out)?;
        out.flush()?;
        if outcome.matches.is_empty() {
            log::info!("No copies of {} found", outcome.reference.display());
        }
        return Ok(exit_code);
    }

    let remover = if args.permanent || config.permanent {
        FsRemover::permanent()
    } else {
        FsRemover::trash()
    };
    let session = RemovalSession::new(outcome.matches);
    let stdin = io::stdin();
    let (remaining, how) = run_removal_loop(session, &remover, stdin.lock(), stdout.lock())
        .context("Interactive removal failed")?;
    if how == PromptOutcome::Exited {
        log::info!("Kept {} copies", remaining.len());
    }

    Ok(exit_code)
}
