//! RX-007: CLI subcommands (check, validate, list, completions).
//!
//! `check` reports its verdict through the exit code:
//!   0 => skip this job
//!   1 => run this job
//!   2 => an error occurred, but the job should still run

use crate::core::catalog::RecipeCatalog;
use crate::core::{parser, resolver, types};
use crate::history;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Exit code telling the pipeline to skip the job.
pub const EXIT_SKIP: i32 = 0;
/// Exit code telling the pipeline to run the job.
pub const EXIT_RUN: i32 = 1;
/// Exit code for any failure. Pipelines treat it as "run".
pub const EXIT_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "roxci",
    version,
    about = "Decide whether a CI job runs, from /roxci commit directives and recipes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log decision steps at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check if a job should be skipped in CI
    #[command(long_about = "Check if a job should be skipped in CI.\n\
        The exit code can be used to decide whether or not to run a job:\n  \
        0 => skip this job\n  \
        1 => run\n\
        Any other exit code implies that an error occurred but the job should still be run.")]
    Check {
        /// Name of the CI job
        job: String,

        /// Path to the recipe file
        #[arg(short, long, env = "ROXCI_CONFIG_FILE", default_value = parser::DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Branch whose commits are already merged
        #[arg(short, long, env = "ROXCI_BASE_BRANCH", default_value = history::DEFAULT_BASE_BRANCH)]
        base: String,

        /// Run git in this directory instead of the current one
        #[arg(short = 'C', long)]
        repo: Option<PathBuf>,
    },

    /// Validate the recipe file
    Validate {
        /// Path to the recipe file
        #[arg(short, long, env = "ROXCI_CONFIG_FILE", default_value = parser::DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// List recipes and their jobs
    List {
        /// Path to the recipe file
        #[arg(short, long, env = "ROXCI_CONFIG_FILE", default_value = parser::DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Print shell completions to stdout
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

/// Dispatch a CLI command. `Ok` carries the process exit code.
pub fn dispatch(cmd: Commands) -> Result<i32, String> {
    match cmd {
        Commands::Check {
            job,
            config,
            base,
            repo,
        } => cmd_check(&job, &config, &base, repo.as_deref()),
        Commands::Validate { config } => cmd_validate(&config).map(|()| 0),
        Commands::List { config } => cmd_list(&config).map(|()| 0),
        Commands::Completions { shell } => {
            cmd_completions(shell, &mut std::io::stdout());
            Ok(0)
        }
    }
}

fn cmd_check(job: &str, config: &Path, base: &str, repo: Option<&Path>) -> Result<i32, String> {
    let catalog =
        parser::load_recipes(config).map_err(|e| format!("Cannot load recipes: {}", e))?;
    let commits = history::commits_since_in(repo, base)
        .map_err(|e| format!("Cannot list commits: {}", e))?;

    let decision = resolver::evaluate(job, &commits, &catalog);
    exit_code_for(job, &decision)
}

/// Map a decision to an exit code. Resolver errors still mean "run".
fn exit_code_for(job: &str, decision: &types::Decision) -> Result<i32, String> {
    if let Some(e) = &decision.error {
        return Err(format!("Check failed: {}", e));
    }
    tracing::info!("Decision for job '{}': {}", job, decision);
    Ok(if decision.run { EXIT_RUN } else { EXIT_SKIP })
}

fn cmd_validate(config: &Path) -> Result<(), String> {
    let recipes = parser::read_recipes(config).map_err(|e| e.to_string())?;
    let errors = parser::validate_recipes(&recipes);

    if !errors.is_empty() {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        return Err(format!("{} validation error(s)", errors.len()));
    }

    let catalog = RecipeCatalog::new(recipes);
    for name in catalog.duplicate_names() {
        eprintln!("  WARNING: recipe {} is declared more than once", name);
    }
    let jobs: usize = catalog.iter().map(|r| r.jobs.len()).sum();
    println!(
        "OK: {} ({} recipes, {} jobs)",
        config.display(),
        catalog.len(),
        jobs
    );
    Ok(())
}

fn cmd_list(config: &Path) -> Result<(), String> {
    let catalog = parser::load_recipes(config).map_err(|e| e.to_string())?;
    let mut out = std::io::stdout().lock();
    write_recipes(&catalog, &mut out).map_err(|e| format!("cannot write output: {}", e))
}

fn write_recipes(
    catalog: &RecipeCatalog,
    out: &mut impl std::io::Write,
) -> std::io::Result<()> {
    for recipe in catalog {
        writeln!(out, "{}: {}", recipe.name, recipe.description)?;
        let jobs: Vec<&str> = recipe.jobs.iter().map(String::as_str).collect();
        writeln!(out, "  jobs: {}", jobs.join(", "))?;
    }
    Ok(())
}

fn cmd_completions(shell: clap_complete::Shell, out: &mut impl std::io::Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
}
