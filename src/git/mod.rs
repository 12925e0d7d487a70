use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub const DEFAULT_DIFF_TARGET: &str = "HEAD";

/// Supplies the files changed relative to a version-control baseline.
#[async_trait]
pub trait ChangeSetProvider: Send + Sync {
    /// Repository-relative paths. Never fails: an unavailable source
    /// yields an empty list.
    async fn changed_files(&self, diff_target: Option<&str>) -> Vec<String>;
}

/// Change set read from a git working tree.
pub struct GitChangeSet {
    repo_path: PathBuf,
}

impl GitChangeSet {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            repo_path: path.as_ref().to_path_buf(),
        }
    }

    async fn git_lines(&self, args: &[&str]) -> Vec<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                parse_name_list(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                tracing::debug!(
                    ?args,
                    status = %output.status,
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "git query failed"
                );
                Vec::new()
            }
            Err(e) => {
                tracing::debug!(?args, error = %e, "could not run git");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl ChangeSetProvider for GitChangeSet {
    /// Union of the diff against `diff_target`, staged changes, unstaged
    /// changes and untracked files that are not ignored.
    async fn changed_files(&self, diff_target: Option<&str>) -> Vec<String> {
        let target = diff_target.unwrap_or(DEFAULT_DIFF_TARGET);

        let committed_args = ["diff", "--name-only", target];
        let staged_args = ["diff", "--name-only", "--cached"];
        let unstaged_args = ["diff", "--name-only"];
        let untracked_args = ["ls-files", "--others", "--exclude-standard"];

        let (committed, staged, unstaged, untracked) = tokio::join!(
            self.git_lines(&committed_args),
            self.git_lines(&staged_args),
            self.git_lines(&unstaged_args),
            self.git_lines(&untracked_args),
        );

        let files = merge_unique([committed, staged, unstaged, untracked]);
        tracing::debug!(diff_target = target, count = files.len(), "collected changed files");
        files
    }
}

/// A fixed list of files, e.g. passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticChangeSet {
    files: Vec<String>,
}

impl StaticChangeSet {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ChangeSetProvider for StaticChangeSet {
    async fn changed_files(&self, _diff_target: Option<&str>) -> Vec<String> {
        merge_unique([self.files.clone()])
    }
}

/// Non-empty, trimmed lines of a `--name-only` style listing.
pub fn parse_name_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Concatenates the lists, dropping repeats but keeping first-seen order.
pub fn merge_unique<I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut seen = HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|file| seen.insert(file.clone()))
        .collect()
}
