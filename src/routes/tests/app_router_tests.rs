use crate::routes::{detect_app_router_routes, Confidence, DetectedRoute};
use pretty_assertions::assert_eq;

fn single(file: &str) -> DetectedRoute {
    let mut routes = detect_app_router_routes(&[file]);
    assert_eq!(routes.len(), 1, "expected one route for {}", file);
    routes.remove(0)
}

fn assert_route(file: &str, path: &str, confidence: Confidence) {
    let route = single(file);
    assert_eq!(route.path, path, "path for {}", file);
    assert_eq!(route.confidence, confidence, "confidence for {}", file);
}

fn assert_skipped(file: &str) {
    assert!(
        detect_app_router_routes(&[file]).is_empty(),
        "{} should not produce a route",
        file
    );
}

#[test]
fn test_root_page() {
    assert_eq!(
        detect_app_router_routes(&["app/page.tsx"]),
        vec![DetectedRoute::new(
            "/",
            "app/page.tsx",
            Confidence::High,
            "Direct page file change"
        )]
    );
}

#[test]
fn test_dashboard_page() {
    assert_eq!(
        detect_app_router_routes(&["app/dashboard/page.tsx"]),
        vec![DetectedRoute::new(
            "/dashboard",
            "app/dashboard/page.tsx",
            Confidence::High,
            "Direct page file change"
        )]
    );
}

#[test]
fn test_page_extensions() {
    assert_route("app/dashboard/settings/page.tsx", "/dashboard/settings", Confidence::High);
    assert_route("app/about/page.jsx", "/about", Confidence::High);
    assert_route("app/about/page.js", "/about", Confidence::High);
    assert_route("app/about/page.ts", "/about", Confidence::High);
}

#[test]
fn test_route_groups_are_stripped() {
    assert_route("app/(marketing)/about/page.tsx", "/about", Confidence::High);
    assert_route("app/(auth)/login/page.tsx", "/login", Confidence::High);
    assert_route("app/(marketing)/(landing)/pricing/page.tsx", "/pricing", Confidence::High);
    assert_route("app/(marketing)/page.tsx", "/", Confidence::High);
}

#[test]
fn test_dynamic_segments_are_preserved() {
    assert_route("app/blog/[slug]/page.tsx", "/blog/[slug]", Confidence::High);
    assert_route("app/docs/[...slug]/page.tsx", "/docs/[...slug]", Confidence::High);
    assert_route("app/docs/[[...slug]]/page.tsx", "/docs/[[...slug]]", Confidence::High);
}

#[test]
fn test_parallel_slots_are_stripped() {
    assert_route("app/@modal/login/page.tsx", "/login", Confidence::High);
    assert_route("app/feed/@sidebar/page.tsx", "/feed", Confidence::High);
}

#[test]
fn test_layouts_are_medium() {
    assert_route("app/layout.tsx", "/", Confidence::Medium);
    assert_route("app/dashboard/layout.tsx", "/dashboard", Confidence::Medium);
}

#[test]
fn test_special_files_are_medium() {
    assert_route("app/dashboard/loading.tsx", "/dashboard", Confidence::Medium);
    assert_route("app/dashboard/error.tsx", "/dashboard", Confidence::Medium);
    assert_route("app/not-found.tsx", "/", Confidence::Medium);
    assert_route("app/dashboard/template.tsx", "/dashboard", Confidence::Medium);

    assert_eq!(single("app/dashboard/loading.tsx").reason, "loading file change");
}

#[test]
fn test_components_inside_app_map_to_parent_route() {
    assert_route("app/dashboard/components/Chart.tsx", "/dashboard", Confidence::Medium);
    assert_route("app/components/Header.tsx", "/", Confidence::Medium);
    assert_route("app/dashboard/ui/Button.tsx", "/dashboard", Confidence::Medium);
    assert_route("app/settings/hooks/useForm.ts", "/settings", Confidence::Medium);
    assert_route("app/(shop)/cart/component/Line.tsx", "/cart", Confidence::Medium);
}

#[test]
fn test_other_app_files_are_low() {
    assert_route("app/dashboard/styles.css", "/dashboard", Confidence::Low);
    assert_route("app/dashboard/constants.ts", "/dashboard", Confidence::Low);
}

#[test]
fn test_api_middleware_and_tests_are_skipped() {
    assert_skipped("app/api/route.ts");
    assert_skipped("app/api/users/route.ts");
    assert_skipped("middleware.ts");
    assert_skipped("next.config.mjs");
    assert_skipped("next-env.d.ts");
    assert_skipped("app/dashboard/page.test.tsx");
    assert_skipped("__tests__/dashboard.tsx");
}

#[test]
fn test_global_files_map_to_root_low() {
    for file in [
        "app/globals.css",
        "globals.css",
        "tailwind.config.ts",
        "postcss.config.mjs",
        "app/theme.ts",
    ] {
        assert_route(file, "/", Confidence::Low);
    }
}

#[test]
fn test_config_files_are_skipped() {
    assert_skipped("package.json");
    assert_skipped("tsconfig.json");
    assert_skipped("tsconfig.build.json");
    assert_skipped(".eslintrc.json");
    assert_skipped("pnpm-lock.yaml");
}

#[test]
fn test_unrelated_files_are_ignored() {
    assert_skipped("README.md");
    assert_skipped("lib/db.ts");
    assert_skipped("app/README.md");
}

#[test]
fn test_windows_separators_match() {
    let route = single(r"app\blog\page.tsx");
    assert_eq!(route.path, "/blog");
    assert_eq!(route.source_file, r"app\blog\page.tsx");
}
