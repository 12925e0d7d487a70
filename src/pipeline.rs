use crate::analysis::{FrameworkDetector, ProjectLayout};
use crate::git::ChangeSetProvider;
use crate::output::DetectionReport;
use crate::routes::{aggregate, DetectedRoute, RouteDetectionOptions};
use std::path::PathBuf;

/// Inputs for one `detect` run.
#[derive(Debug, Clone)]
pub struct DetectRequest {
    /// Directory scanned when the framework is not forced.
    pub root: PathBuf,
    pub options: RouteDetectionOptions,
    /// Changed files matching any of these never produce routes.
    pub ignore: Vec<glob::Pattern>,
}

impl DetectRequest {
    pub fn new(root: impl Into<PathBuf>, options: RouteDetectionOptions) -> Self {
        Self {
            root: root.into(),
            options,
            ignore: Vec::new(),
        }
    }

    pub fn with_ignore(mut self, ignore: Vec<glob::Pattern>) -> Self {
        self.ignore = ignore;
        self
    }
}

/// Change set → framework → routes.
pub async fn detect_changed_routes(
    provider: &dyn ChangeSetProvider,
    request: &DetectRequest,
) -> DetectionReport {
    let changed = provider
        .changed_files(request.options.diff_target.as_deref())
        .await;
    let changed = filter_ignored(changed, &request.ignore);

    if changed.is_empty() {
        return DetectionReport::no_changes();
    }

    let layout = match request.options.framework {
        Some(framework) => ProjectLayout::at_root(framework),
        None => FrameworkDetector::new().detect_layout(&request.root),
    };
    let detection = aggregate(
        detect_rebased(&layout, &changed),
        request.options.max_routes(),
    );

    DetectionReport::new(layout.framework, changed, detection)
}

/// Classifies each file relative to the project root, but reports it under
/// the path the change set gave.
fn detect_rebased(layout: &ProjectLayout, changed: &[String]) -> Vec<DetectedRoute> {
    changed
        .iter()
        .flat_map(|file| {
            let rebased = layout.rebase_file(file);
            layout
                .framework
                .detect_routes(&[rebased])
                .into_iter()
                .map(move |route| DetectedRoute {
                    source_file: file.clone(),
                    ..route
                })
        })
        .collect()
}

pub fn filter_ignored(files: Vec<String>, ignore: &[glob::Pattern]) -> Vec<String> {
    if ignore.is_empty() {
        return files;
    }
    files
        .into_iter()
        .filter(|file| {
            let ignored = ignore.iter().any(|pattern| pattern.matches(file));
            if ignored {
                tracing::debug!(file = %file, "ignored by config");
            }
            !ignored
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::StaticChangeSet;
    use crate::routes::{Confidence, Framework, Truncation};
    use std::fs;
    use tempfile::TempDir;

    fn pattern(p: &str) -> glob::Pattern {
        glob::Pattern::new(p).unwrap()
    }

    #[tokio::test]
    async fn test_no_changes_reports_message() {
        let temp_dir = TempDir::new().unwrap();
        let provider = StaticChangeSet::default();
        let request = DetectRequest::new(temp_dir.path(), RouteDetectionOptions::default());

        let report = detect_changed_routes(&provider, &request).await;
        assert_eq!(report, DetectionReport::no_changes());
    }

    #[tokio::test]
    async fn test_everything_ignored_counts_as_no_changes() {
        let temp_dir = TempDir::new().unwrap();
        let provider = StaticChangeSet::new(["docs/intro.md", "docs/api.md"]);
        let request = DetectRequest::new(temp_dir.path(), RouteDetectionOptions::default())
            .with_ignore(vec![pattern("docs/**")]);

        let report = detect_changed_routes(&provider, &request).await;
        assert!(report.message.is_some());
    }

    #[tokio::test]
    async fn test_detects_framework_and_rebases_monorepo_paths() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("apps/web/app")).unwrap();
        fs::write(temp_dir.path().join("apps/web/app/layout.tsx"), "").unwrap();

        let provider = StaticChangeSet::new([
            "apps/web/app/settings/page.tsx",
            "apps/web/app/layout.tsx",
            "README.md",
        ]);
        let request = DetectRequest::new(temp_dir.path(), RouteDetectionOptions::default());

        let report = detect_changed_routes(&provider, &request).await;
        assert_eq!(report.framework, Some(Framework::NextjsApp));
        assert_eq!(report.changed_files.len(), 3);

        let paths: Vec<&str> = report.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/settings", "/"]);
        assert_eq!(report.routes[0].source_file, "apps/web/app/settings/page.tsx");
        assert_eq!(report.routes[1].source_file, "apps/web/app/layout.tsx");
        assert_eq!(report.routes[1].confidence, Confidence::Medium);
    }

    #[tokio::test]
    async fn test_source_files_match_changed_files_in_monorepo() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("apps/web/app")).unwrap();
        fs::write(temp_dir.path().join("apps/web/app/layout.tsx"), "").unwrap();

        let provider = StaticChangeSet::new([
            "apps/web/app/settings/page.tsx",
            "app/globals.css",
            "apps/web/app/globals.css",
        ]);
        let request = DetectRequest::new(temp_dir.path(), RouteDetectionOptions::default());

        let report = detect_changed_routes(&provider, &request).await;
        let sources: Vec<&str> = report.routes.iter().map(|r| r.source_file.as_str()).collect();
        assert_eq!(sources, vec!["apps/web/app/settings/page.tsx", "app/globals.css"]);
        for source in sources {
            assert!(report.changed_files.iter().any(|f| f == source));
        }
    }

    #[tokio::test]
    async fn test_forced_framework_and_cap() {
        let temp_dir = TempDir::new().unwrap();
        let provider = StaticChangeSet::new([
            "pages/a.tsx",
            "pages/b.tsx",
            "pages/c.tsx",
            "pages/_app.tsx",
        ]);
        let options = RouteDetectionOptions {
            framework: Some(Framework::NextjsPages),
            max_routes: Some(2),
            diff_target: None,
        };
        let request = DetectRequest::new(temp_dir.path(), options);

        let report = detect_changed_routes(&provider, &request).await;
        assert_eq!(report.framework, Some(Framework::NextjsPages));
        assert_eq!(report.routes.len(), 2);
        assert_eq!(report.truncation, Some(Truncation { detected: 4, kept: 2 }));
    }

    #[test]
    fn test_filter_ignored() {
        let files = vec![
            "docs/a.md".to_string(),
            "app/page.tsx".to_string(),
            "app/page.stories.tsx".to_string(),
        ];
        let kept = filter_ignored(files, &[pattern("docs/**"), pattern("**/*.stories.tsx")]);
        assert_eq!(kept, vec!["app/page.tsx".to_string()]);
    }
}
