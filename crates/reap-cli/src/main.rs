//! reap - rebase every branch onto the current one and prune the absorbed ones.

use anyhow::Result;
use clap::Parser;
use reap_core::RunConfig;
use reap_git::Repository;

mod output;
mod report;

use report::Reporter;

/// Rebase every local branch onto the checked-out branch and delete the
/// ones left with no difference from it.
///
/// Run from the root of a repository. Branches that conflict are rolled
/// back and kept.
#[derive(Debug, Parser)]
#[command(name = "reap", version)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    if let Err(e) = run() {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = RunConfig::default();

    let repo = Repository::open_current()?;
    let git = config.git_command(repo.root());
    let repo = repo.with_git(git);

    let mut reporter = Reporter::default();
    let summary = reap_core::run(&repo, &config, &mut reporter)?;
    reporter.finish(&summary);

    Ok(())
}
