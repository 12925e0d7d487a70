use super::fs::{FileSystem, LocalFs};
use crate::routes::Framework;
use serde::Serialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// How many directory levels below the root are searched for a project.
pub const MAX_SCAN_DEPTH: usize = 2;

/// Directories that never hold application source.
pub const SKIP_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    ".pnpm-store",
    ".yarn",
    "bower_components",
    ".next",
    ".nuxt",
    ".svelte-kit",
    ".turbo",
    ".vercel",
    ".cache",
    "dist",
    "build",
    "out",
    "target",
    "coverage",
    ".nyc_output",
];

const SOURCE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Detected framework and the directory (relative to the scan root) whose
/// layout produced the signal. Empty for the scan root itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLayout {
    pub framework: Framework,
    pub project_root: PathBuf,
}

impl ProjectLayout {
    pub fn at_root(framework: Framework) -> Self {
        Self {
            framework,
            project_root: PathBuf::new(),
        }
    }

    /// Makes a repository-relative path relative to the project root, so
    /// `apps/web/app/page.tsx` becomes `app/page.tsx`. Paths outside the
    /// project root are returned unchanged.
    pub fn rebase_file(&self, file: &str) -> String {
        let prefix = self
            .project_root
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/");

        if prefix.is_empty() {
            return file.to_string();
        }

        let normalized = file.replace('\\', "/");
        match normalized.strip_prefix(&format!("{}/", prefix)) {
            Some(rest) => rest.to_string(),
            None => file.to_string(),
        }
    }
}

pub struct FrameworkDetector<F: FileSystem = LocalFs> {
    fs: F,
}

impl FrameworkDetector<LocalFs> {
    pub fn new() -> Self {
        Self::with_fs(LocalFs)
    }
}

impl Default for FrameworkDetector<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> FrameworkDetector<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Breadth-first list of directories (relative to `root`, root first)
    /// that could be a project root, bounded by the scan depth.
    pub fn candidate_roots(&self, root: &Path) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        let mut queue = VecDeque::from([(PathBuf::new(), 0usize)]);

        while let Some((dir, depth)) = queue.pop_front() {
            if depth < MAX_SCAN_DEPTH {
                for name in self.fs.list_directories(&root.join(&dir)) {
                    if SKIP_DIRS.contains(&name.as_str()) {
                        continue;
                    }
                    queue.push_back((dir.join(name), depth + 1));
                }
            }
            candidates.push(dir);
        }

        candidates
    }

    pub fn detect(&self, root: &Path) -> Framework {
        self.detect_layout(root).framework
    }

    /// App Router signals are checked in every candidate before any Pages
    /// Router signal, so hybrid repositories resolve to the App Router.
    pub fn detect_layout(&self, root: &Path) -> ProjectLayout {
        let candidates = self.candidate_roots(root);

        let checks: [(Framework, fn(&Self, &Path) -> bool); 2] = [
            (Framework::NextjsApp, Self::has_app_router),
            (Framework::NextjsPages, Self::has_pages_router),
        ];

        for (framework, check) in checks {
            if let Some(dir) = candidates.iter().find(|dir| check(self, &root.join(dir))) {
                tracing::debug!(%framework, project_root = %dir.display(), "framework detected");
                return ProjectLayout {
                    framework,
                    project_root: dir.clone(),
                };
            }
        }

        tracing::debug!(root = %root.display(), "no Next.js signals, using generic detection");
        ProjectLayout::at_root(Framework::Generic)
    }

    fn has_app_router(&self, dir: &Path) -> bool {
        let app = dir.join("app");
        self.has_source_file(&app, "page") || self.has_source_file(&app, "layout")
    }

    fn has_pages_router(&self, dir: &Path) -> bool {
        self.has_source_file(&dir.join("pages"), "index")
    }

    fn has_source_file(&self, dir: &Path, stem: &str) -> bool {
        SOURCE_EXTENSIONS
            .iter()
            .any(|ext| self.fs.exists(&dir.join(format!("{}.{}", stem, ext))))
    }
}

/// Detects the framework under `root`, or the current directory.
pub fn detect_framework(root: Option<&Path>) -> Framework {
    FrameworkDetector::new().detect(&scan_root(root))
}

pub fn detect_project_layout(root: Option<&Path>) -> ProjectLayout {
    FrameworkDetector::new().detect_layout(&scan_root(root))
}

fn scan_root(root: Option<&Path>) -> PathBuf {
    match root {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

#[cfg(test)]
#[path = "tests/framework_tests.rs"]
mod tests;
