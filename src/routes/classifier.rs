use super::{normalize_file_path, Confidence, DetectedRoute};
use regex::{Captures, Regex};

pub const GLOBAL_REASON: &str = "Global style file affects all pages";

/// Builds a string from the captures of a matched rule.
pub type CaptureFn = fn(&Captures<'_>) -> String;

/// A file-naming convention that maps a file straight to a route.
pub struct RouteRule {
    pub name: &'static str,
    pattern: Regex,
    confidence: Confidence,
    route: CaptureFn,
    reason: CaptureFn,
}

impl RouteRule {
    pub fn new(
        name: &'static str,
        pattern: &str,
        confidence: Confidence,
        route: CaptureFn,
        reason: CaptureFn,
    ) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            confidence,
            route,
            reason,
        }
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    fn apply(&self, file: &str) -> Option<Classification> {
        let caps = self.pattern.captures(file)?;
        Some(Classification::Route {
            rule: self.name,
            path: (self.route)(&caps),
            confidence: self.confidence,
            reason: (self.reason)(&caps),
        })
    }
}

/// Outcome of running one file through a [`RuleSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// No visual output (API handlers, middleware, tests, ...).
    Skipped,
    /// Non-visual project configuration.
    Config,
    /// Affects every page.
    Global,
    Route {
        rule: &'static str,
        path: String,
        confidence: Confidence,
        reason: String,
    },
    Unmatched,
}

/// Ordered rule tiers for one framework. Tiers are evaluated skip, config,
/// global, route; within the route tier the first matching rule wins.
pub struct RuleSet {
    skip: Vec<Regex>,
    config: Vec<Regex>,
    global: Vec<Regex>,
    routes: Vec<RouteRule>,
}

impl RuleSet {
    pub fn new(skip: &[&str], config: &[&str], global: &[&str], routes: Vec<RouteRule>) -> Self {
        Self {
            skip: compile(skip),
            config: compile(config),
            global: compile(global),
            routes,
        }
    }

    pub fn rules(&self) -> impl Iterator<Item = &RouteRule> {
        self.routes.iter()
    }

    pub fn classify(&self, file: &str) -> Classification {
        let file = normalize_file_path(file);

        if self.skip.iter().any(|p| p.is_match(&file)) {
            return Classification::Skipped;
        }
        if self.config.iter().any(|p| p.is_match(&file)) {
            return Classification::Config;
        }
        if self.global.iter().any(|p| p.is_match(&file)) {
            return Classification::Global;
        }

        self.routes
            .iter()
            .find_map(|rule| rule.apply(&file))
            .unwrap_or(Classification::Unmatched)
    }

    /// Classifies every file, emitting at most one route per file.
    pub fn detect<S: AsRef<str>>(&self, files: &[S]) -> Vec<DetectedRoute> {
        let mut routes = Vec::new();

        for file in files {
            let file = file.as_ref();
            match self.classify(file) {
                Classification::Global => {
                    tracing::debug!(file, "global file");
                    routes.push(DetectedRoute::new("/", file, Confidence::Low, GLOBAL_REASON));
                }
                Classification::Route {
                    rule,
                    path,
                    confidence,
                    reason,
                } => {
                    tracing::debug!(file, rule, %path, %confidence, "matched route rule");
                    routes.push(DetectedRoute::new(path, file, confidence, reason));
                }
                other => {
                    tracing::debug!(file, outcome = ?other, "no route");
                }
            }
        }

        routes
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

/// Capture group `n`, or the empty string when it did not participate.
pub fn group<'a>(caps: &'a Captures<'_>, n: usize) -> &'a str {
    caps.get(n).map_or("", |m| m.as_str())
}
