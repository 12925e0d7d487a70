use crate::error::Error;
use crate::routes::{DetectedRoute, Framework, RouteDetection, Truncation};
use crate::theme::Theme;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

pub const NO_CHANGES_MESSAGE: &str = "No changed files detected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Table,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" | "text" => Ok(OutputFormat::Table),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Everything the `detect` command reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changed_files: Vec<String>,
    pub routes: Vec<DetectedRoute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation: Option<Truncation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DetectionReport {
    pub fn no_changes() -> Self {
        Self {
            framework: None,
            changed_files: Vec::new(),
            routes: Vec::new(),
            truncation: None,
            message: Some(NO_CHANGES_MESSAGE.to_string()),
        }
    }

    pub fn new(framework: Framework, changed_files: Vec<String>, detection: RouteDetection) -> Self {
        Self {
            framework: Some(framework),
            changed_files,
            routes: detection.routes,
            truncation: detection.truncation,
            message: None,
        }
    }

    pub fn render(&self, format: OutputFormat, theme: &Theme) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Markdown => Ok(self.to_markdown()),
            OutputFormat::Table => Ok(self.to_table(theme)),
        }
    }

    pub fn to_markdown(&self) -> String {
        if self.routes.is_empty() {
            return "_No affected routes detected._\n".to_string();
        }

        let mut out = String::from("| Route | Confidence | Source | Reason |\n");
        out.push_str("| --- | --- | --- | --- |\n");
        for route in &self.routes {
            let _ = writeln!(
                out,
                "| `{}` | {} | `{}` | {} |",
                route.path,
                route.confidence,
                route.source_file,
                escape_cell(&route.reason)
            );
        }
        if let Some(truncation) = &self.truncation {
            let _ = writeln!(
                out,
                "\n_Showing {} of {} detected routes._",
                truncation.kept, truncation.detected
            );
        }
        out
    }

    pub fn to_table(&self, theme: &Theme) -> String {
        let mut out = String::new();

        if let Some(message) = &self.message {
            let _ = writeln!(out, "{}", theme.muted.apply(message));
            return out;
        }
        if let Some(framework) = self.framework {
            let _ = writeln!(out, "{} {}", theme.header.apply("Framework:"), framework);
        }
        let _ = writeln!(
            out,
            "{} {}",
            theme.header.apply("Changed files:"),
            self.changed_files.len()
        );

        if self.routes.is_empty() {
            let _ = writeln!(out, "\n{}", theme.muted.apply("No affected routes detected."));
            return out;
        }

        let width = self
            .routes
            .iter()
            .map(|r| r.path.len())
            .max()
            .unwrap_or(0)
            .max("ROUTE".len());

        let _ = writeln!(
            out,
            "\n{}",
            theme
                .header
                .apply(&format!("{:<width$}  {:<10}  SOURCE", "ROUTE", "CONFIDENCE"))
        );
        for route in &self.routes {
            let confidence = format!("{:<10}", route.confidence.as_str());
            let _ = writeln!(
                out,
                "{:<width$}  {}  {}",
                route.path,
                theme.confidence(route.confidence).apply(&confidence),
                route.source_file
            );
            let _ = writeln!(
                out,
                "{:<width$}  {}",
                "",
                theme.muted.apply(&route.reason)
            );
        }

        if let Some(truncation) = &self.truncation {
            let _ = writeln!(out, "\n{}", theme.warning.apply(&truncation.message()));
        }
        out
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{Confidence, DetectedRoute};
    use pretty_assertions::assert_eq;

    fn report() -> DetectionReport {
        DetectionReport::new(
            Framework::NextjsApp,
            vec!["app/dashboard/page.tsx".to_string(), "globals.css".to_string()],
            RouteDetection {
                routes: vec![
                    DetectedRoute::new(
                        "/dashboard",
                        "app/dashboard/page.tsx",
                        Confidence::High,
                        "Direct page file change",
                    ),
                    DetectedRoute::new("/", "globals.css", Confidence::Low, "a | b"),
                ],
                truncation: None,
            },
        )
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&report().render(OutputFormat::Json, &Theme::monochrome()).unwrap())
                .unwrap();

        assert_eq!(json["framework"], "nextjs-app");
        assert_eq!(json["changedFiles"].as_array().unwrap().len(), 2);
        assert_eq!(json["routes"][0]["sourceFile"], "app/dashboard/page.tsx");
        assert!(json.get("message").is_none());
        assert!(json.get("truncation").is_none());
    }

    #[test]
    fn test_no_changes_json() {
        let json = serde_json::to_value(DetectionReport::no_changes()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "routes": [], "message": "No changed files detected" })
        );
    }

    #[test]
    fn test_markdown_table() {
        let markdown = report().to_markdown();
        assert_eq!(
            markdown,
            "| Route | Confidence | Source | Reason |\n\
             | --- | --- | --- | --- |\n\
             | `/dashboard` | high | `app/dashboard/page.tsx` | Direct page file change |\n\
             | `/` | low | `globals.css` | a \\| b |\n"
        );
    }

    #[test]
    fn test_markdown_truncation_note() {
        let mut report = report();
        report.truncation = Some(Truncation { detected: 9, kept: 2 });
        assert!(report.to_markdown().ends_with("_Showing 2 of 9 detected routes._\n"));
    }

    #[test]
    fn test_table_lists_routes() {
        colored::control::set_override(false);
        let table = report().to_table(&Theme::dark());
        assert!(table.contains("Framework: nextjs-app"));
        assert!(table.contains("Changed files: 2"));
        assert!(table.contains("/dashboard  high        app/dashboard/page.tsx"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
