//! Maps changed source files to the UI routes they are likely to affect.
//!
//! Each framework convention has its own adapter built from an ordered
//! [`classifier::RuleSet`]; [`aggregate`] then dedups, ranks and caps the
//! combined output.

use crate::analysis;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub mod aggregate;
pub mod classifier;
pub mod generic;
pub mod nextjs;

pub use aggregate::{aggregate, Truncation};
pub use generic::detect_generic_routes;
pub use nextjs::{detect_app_router_routes, detect_pages_router_routes};

pub const DEFAULT_MAX_ROUTES: usize = 5;

/// How sure we are that a changed file visually affects a route.
///
/// Variant order is the sort order: `High` ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn rank(self) -> u8 {
        match self {
            Confidence::High => 0,
            Confidence::Medium => 1,
            Confidence::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedRoute {
    /// Rooted URL path, e.g. `/dashboard` or `/blog/[slug]`.
    pub path: String,
    /// The changed file this route was derived from, exactly as supplied.
    pub source_file: String,
    pub confidence: Confidence,
    /// Display only. Never compared.
    pub reason: String,
}

impl DetectedRoute {
    pub fn new(
        path: impl Into<String>,
        source_file: impl Into<String>,
        confidence: Confidence,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            source_file: source_file.into(),
            confidence,
            reason: reason.into(),
        }
    }
}

/// Routing convention used to interpret changed files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Framework {
    #[serde(rename = "nextjs-app", alias = "app-router")]
    NextjsApp,
    #[serde(rename = "nextjs-pages", alias = "pages-router")]
    NextjsPages,
    #[serde(rename = "generic")]
    Generic,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::NextjsApp, Framework::NextjsPages, Framework::Generic];

    pub fn as_str(self) -> &'static str {
        match self {
            Framework::NextjsApp => "nextjs-app",
            Framework::NextjsPages => "nextjs-pages",
            Framework::Generic => "generic",
        }
    }

    /// Runs this framework's adapter over `files`.
    pub fn detect_routes<S: AsRef<str>>(self, files: &[S]) -> Vec<DetectedRoute> {
        match self {
            Framework::NextjsApp => detect_app_router_routes(files),
            Framework::NextjsPages => detect_pages_router_routes(files),
            Framework::Generic => detect_generic_routes(files),
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nextjs-app" | "app-router" => Ok(Framework::NextjsApp),
            "nextjs-pages" | "pages-router" => Ok(Framework::NextjsPages),
            "generic" => Ok(Framework::Generic),
            other => Err(Error::UnknownFramework(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDetectionOptions {
    /// Skip detection and use this framework.
    pub framework: Option<Framework>,
    /// Upper bound on returned routes. `None` means [`DEFAULT_MAX_ROUTES`].
    pub max_routes: Option<usize>,
    /// Passed through to the change-set provider; unused here.
    pub diff_target: Option<String>,
}

impl RouteDetectionOptions {
    pub fn max_routes(&self) -> usize {
        self.max_routes.unwrap_or(DEFAULT_MAX_ROUTES)
    }
}

/// Ranked routes plus a record of any truncation applied to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteDetection {
    pub routes: Vec<DetectedRoute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation: Option<Truncation>,
}

impl RouteDetection {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.path.as_str()).collect()
    }
}

/// Detects affected routes, inferring the framework from the current
/// directory when `options.framework` is unset.
///
/// Paths must be relative to the project root. In a monorepo, rebase them
/// first with [`analysis::ProjectLayout::rebase_file`].
pub fn detect_routes<S: AsRef<str>>(
    changed_files: &[S],
    options: &RouteDetectionOptions,
) -> RouteDetection {
    detect_routes_with(changed_files, options, || analysis::detect_framework(None))
}

/// Like [`detect_routes`], scanning `root` instead of the current directory.
pub fn detect_routes_in<S: AsRef<str>>(
    root: &Path,
    changed_files: &[S],
    options: &RouteDetectionOptions,
) -> RouteDetection {
    detect_routes_with(changed_files, options, || {
        analysis::detect_framework(Some(root))
    })
}

/// Like [`detect_routes`], but the framework comes from `resolve` when not
/// forced. `resolve` is never called for an empty change set.
pub fn detect_routes_with<S, R>(
    changed_files: &[S],
    options: &RouteDetectionOptions,
    resolve: R,
) -> RouteDetection
where
    S: AsRef<str>,
    R: FnOnce() -> Framework,
{
    if changed_files.is_empty() {
        return RouteDetection::default();
    }

    let framework = options.framework.unwrap_or_else(resolve);
    tracing::debug!(%framework, files = changed_files.len(), "detecting routes");

    aggregate(framework.detect_routes(changed_files), options.max_routes())
}

/// Normalizes separators so Windows-style and `./`-prefixed paths match the
/// forward-slash rule tables.
pub(crate) fn normalize_file_path(file: &str) -> String {
    let file = file.replace('\\', "/");
    let mut trimmed = file.as_str();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests;
