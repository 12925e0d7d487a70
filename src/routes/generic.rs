//! Fallback heuristics for projects that are not Next.js: Remix-style flat
//! route files, SvelteKit `+page` files, `src/pages` and shared components.

use super::classifier::{group, RouteRule, RuleSet};
use super::{Confidence, DetectedRoute};
use once_cell::sync::Lazy;

const SKIP_PATTERNS: &[&str] = &[
    r"\.(test|spec)\.(ts|tsx|js|jsx)$",
    r"^__tests__/",
    r"^(package|tsconfig|vite\.config|vitest\.config)\.",
    r"^\.env",
    r"^pnpm-lock\.yaml$",
    r"^yarn\.lock$",
    r"^package-lock\.json$",
];

const GLOBAL_PATTERNS: &[&str] = &[
    r"globals?\.css$",
    r"global\.(scss|less)$",
    r"tailwind\.config\.",
    r"postcss\.config\.",
    r"theme\.(ts|js|css)$",
];

static GENERIC: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        SKIP_PATTERNS,
        &[],
        GLOBAL_PATTERNS,
        vec![
            RouteRule::new(
                "remix",
                r"^(?:src/)?routes/(.+)\.(tsx|ts|jsx|js)$",
                Confidence::High,
                |c| remix_route_to_path(group(c, 1)),
                |_| "Route file change".to_string(),
            ),
            RouteRule::new(
                "sveltekit",
                r"^src/routes/(.+/)?\+page\.(svelte|ts|js)$",
                Confidence::High,
                |c| {
                    let dir = group(c, 1).trim_end_matches('/');
                    if dir.is_empty() {
                        "/".to_string()
                    } else {
                        format!("/{}", dir)
                    }
                },
                |_| "SvelteKit page file change".to_string(),
            ),
            RouteRule::new(
                "pages-dir",
                r"^src/pages/(.+)\.(tsx|ts|jsx|js)$",
                Confidence::Medium,
                |c| match group(c, 1) {
                    "index" => "/".to_string(),
                    name => format!("/{}", name.strip_suffix("/index").unwrap_or(name)),
                },
                |_| "Page file change".to_string(),
            ),
            RouteRule::new(
                "component",
                r"^src/components?/.+\.(tsx|ts|jsx|js|svelte|vue)$",
                Confidence::Low,
                |_| "/".to_string(),
                |_| "Shared component change may affect any page".to_string(),
            ),
        ],
    )
});

pub fn generic_rules() -> &'static RuleSet {
    &GENERIC
}

/// Routes affected by `files` using framework-agnostic heuristics.
pub fn detect_generic_routes<S: AsRef<str>>(files: &[S]) -> Vec<DetectedRoute> {
    GENERIC.detect(files)
}

/// Converts a Remix flat-route file name to a URL path: dots become
/// slashes, a trailing `._index` is dropped and `$param` becomes `:param`.
///
/// Escaped dots (`[.]`) and `_`-prefixed pathless layouts are not handled.
pub fn remix_route_to_path(name: &str) -> String {
    if name == "_index" || name == "index" {
        return "/".to_string();
    }

    let name = name.strip_suffix("._index").unwrap_or(name);
    format!("/{}", name.replace('.', "/").replace('$', ":"))
}
