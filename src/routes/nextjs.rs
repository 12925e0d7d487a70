//! Next.js conventions: the `app/` router and the legacy `pages/` router.

use super::classifier::{group, RouteRule, RuleSet};
use super::{Confidence, DetectedRoute};
use once_cell::sync::Lazy;

/// Files with no visual output.
const SKIP_PATTERNS: &[&str] = &[
    r"^app/api/",
    r"^pages/api/",
    r"^middleware\.(ts|js|mjs)$",
    r"^next\.config\.(ts|js|mjs)$",
    r"^next-env\.d\.ts$",
    r"\.(test|spec)\.(ts|tsx|js|jsx)$",
    r"^__tests__/",
];

const CONFIG_PATTERNS: &[&str] = &[
    r"^package\.json$",
    r"^tsconfig.*\.json$",
    r"^\.eslintrc",
    r"^\.prettierrc",
    r"^pnpm-lock\.yaml$",
    r"^yarn\.lock$",
    r"^package-lock\.json$",
];

const GLOBAL_PATTERNS: &[&str] = &[
    r"^(app/)?globals?\.css$",
    r"^(app/)?global\.(scss|less)$",
    r"^tailwind\.config\.(ts|js|mjs|cjs)$",
    r"^postcss\.config\.(ts|js|mjs|cjs)$",
    r"^(app/)?theme\.(ts|js)$",
];

static APP_ROUTER: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        SKIP_PATTERNS,
        CONFIG_PATTERNS,
        GLOBAL_PATTERNS,
        vec![
            RouteRule::new(
                "page",
                r"^app/(.+/)?page\.(tsx|ts|jsx|js)$",
                Confidence::High,
                |c| build_route_path(group(c, 1)),
                |_| "Direct page file change".to_string(),
            ),
            RouteRule::new(
                "layout",
                r"^app/(.+/)?layout\.(tsx|ts|jsx|js)$",
                Confidence::Medium,
                |c| build_route_path(group(c, 1)),
                |_| "Layout file change affects route and children".to_string(),
            ),
            RouteRule::new(
                "special",
                r"^app/(.+/)?(loading|error|not-found|template)\.(tsx|ts|jsx|js)$",
                Confidence::Medium,
                |c| build_route_path(group(c, 1)),
                |c| format!("{} file change", group(c, 2)),
            ),
            RouteRule::new(
                "component",
                r"^app/(.+/)?(?:components?|ui|lib|hooks|utils)/.+\.(tsx|ts|jsx|js)$",
                Confidence::Medium,
                |c| build_route_path(group(c, 1)),
                |_| "Component in app directory, parent route may be affected".to_string(),
            ),
            RouteRule::new(
                "app-file",
                r"^app/(.+/)?[^/]+\.(tsx|ts|jsx|js|css|scss)$",
                Confidence::Low,
                |c| build_route_path(group(c, 1)),
                |_| "File in app directory may affect route".to_string(),
            ),
        ],
    )
});

static PAGES_ROUTER: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        SKIP_PATTERNS,
        CONFIG_PATTERNS,
        GLOBAL_PATTERNS,
        vec![
            // _app and _document also end in a page extension, so they go first.
            RouteRule::new(
                "app-wrapper",
                r"^pages/_(?:app|document)\.(tsx|ts|jsx|js)$",
                Confidence::Medium,
                |_| "/".to_string(),
                |_| "App wrapper change affects all pages".to_string(),
            ),
            RouteRule::new(
                "index",
                r"^pages/index\.(tsx|ts|jsx|js)$",
                Confidence::High,
                |_| "/".to_string(),
                |_| "Index page change".to_string(),
            ),
            RouteRule::new(
                "page",
                r"^pages/(.+)\.(tsx|ts|jsx|js)$",
                Confidence::High,
                |c| {
                    let name = group(c, 1);
                    format!("/{}", name.strip_suffix("/index").unwrap_or(name))
                },
                |_| "Direct page file change".to_string(),
            ),
        ],
    )
});

pub fn app_router_rules() -> &'static RuleSet {
    &APP_ROUTER
}

pub fn pages_router_rules() -> &'static RuleSet {
    &PAGES_ROUTER
}

/// Routes affected by `files` in an App Router project.
pub fn detect_app_router_routes<S: AsRef<str>>(files: &[S]) -> Vec<DetectedRoute> {
    APP_ROUTER.detect(files)
}

/// Routes affected by `files` in a Pages Router project.
pub fn detect_pages_router_routes<S: AsRef<str>>(files: &[S]) -> Vec<DetectedRoute> {
    PAGES_ROUTER.detect(files)
}

/// Turns an App Router directory (relative to `app/`) into a URL path.
///
/// Route groups like `(marketing)` and parallel slots like `@modal` never
/// appear in the URL; dynamic segments (`[slug]`, `[...slug]`,
/// `[[...slug]]`) are kept as-is.
pub fn build_route_path(dir: &str) -> String {
    let segments: Vec<&str> = dir
        .split('/')
        .filter(|seg| !seg.is_empty())
        .filter(|seg| !is_route_group(seg))
        .filter(|seg| !seg.starts_with('@'))
        .collect();

    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}", segments.join("/"))
}

fn is_route_group(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('(') && segment.ends_with(')')
}
