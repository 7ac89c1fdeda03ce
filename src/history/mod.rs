//! RX-006: Subjects of commits not yet on the base branch.
//!
//! Runs `git cherry -v <base>`, which prints one `+ <sha> <subject>` line per
//! commit, oldest first. Commits whose patch already exists upstream are
//! marked `-` and are kept too: a directive in them still counts.

use std::path::Path;
use std::process::{Command, Stdio};

/// Default comparison branch.
pub const DEFAULT_BASE_BRANCH: &str = "master";

/// Failure to obtain commit history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("failed to spawn git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git cherry exited with code {exit_code}: {output}")]
    Git { exit_code: i32, output: String },
}

/// Output from running git.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Commit subjects on HEAD that are not on `base`, oldest first.
pub fn commits_since(base: &str) -> Result<Vec<String>, HistoryError> {
    commits_since_in(None, base)
}

/// Like [`commits_since`], but runs git inside `repo` instead of the
/// current directory.
pub fn commits_since_in(repo: Option<&Path>, base: &str) -> Result<Vec<String>, HistoryError> {
    let out = run_git(repo, &["cherry", "-v", base])?;
    if !out.success() {
        return Err(HistoryError::Git {
            exit_code: out.exit_code,
            output: format!("{}{}", out.stdout, out.stderr).trim().to_string(),
        });
    }
    let commits = parse_cherry_output(&out.stdout);
    tracing::debug!(base, commits = commits.len(), "listed commits");
    Ok(commits)
}

fn run_git(repo: Option<&Path>, args: &[&str]) -> Result<ExecOutput, HistoryError> {
    let mut cmd = Command::new("git");
    if let Some(dir) = repo {
        cmd.current_dir(dir);
    }
    let output = cmd
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(HistoryError::Spawn)?;

    Ok(ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Extract commit subjects from `git cherry -v` output.
pub fn parse_cherry_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let rest = line
                .strip_prefix("+ ")
                .or_else(|| line.strip_prefix("- "))
                .unwrap_or(line);
            match rest.split_once(' ') {
                Some((_sha, subject)) => subject.to_string(),
                None => String::new(),
            }
        })
        .collect()
}
