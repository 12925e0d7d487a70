use crate::error::Error;
use crate::output::OutputFormat;
use crate::routes::{Framework, RouteDetectionOptions, DEFAULT_MAX_ROUTES};
use crate::theme::ThemeName;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub detection: DetectionConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    pub max_routes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_target: Option<String>,
    /// Glob patterns for changed files that should never produce routes.
    pub ignore: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_routes: DEFAULT_MAX_ROUTES,
            framework: None,
            diff_target: None,
            ignore: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub theme: ThemeName,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            color_output: true,
            theme: ThemeName::Dark,
        }
    }
}

impl DetectionConfig {
    pub fn ignore_patterns(&self) -> Result<Vec<glob::Pattern>, Error> {
        self.ignore
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| Error::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }

    pub fn route_options(&self) -> RouteDetectionOptions {
        RouteDetectionOptions {
            framework: self.framework,
            max_routes: Some(self.max_routes),
            diff_target: self.diff_target.clone(),
        }
    }
}

impl Config {
    pub fn create_default(path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.detection.max_routes == 0 {
            return Err(Error::InvalidMaxRoutes(0));
        }
        self.detection.ignore_patterns()?;
        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "pre-post", "pre-post")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_round_trips_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/config.toml");

        Config::create_default(&path).unwrap();
        let config = Config::load(&path).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.detection.max_routes, 5);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [detection]
            framework = "app-router"
            ignore = ["docs/**", "*.md"]

            [display]
            format = "markdown"
            "#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.detection.framework, Some(Framework::NextjsApp));
        assert_eq!(config.detection.max_routes, DEFAULT_MAX_ROUTES);
        assert_eq!(config.display.format, OutputFormat::Markdown);
        assert!(config.display.color_output);
        assert_eq!(config.detection.ignore_patterns().unwrap().len(), 2);
    }

    #[test]
    fn test_theme_is_read_from_display_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[display]\ntheme = \"monochrome\"\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().display.theme, ThemeName::Monochrome);

        fs::write(&path, "[display]\ntheme = \"neon\"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_rejects_zero_max_routes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[detection]\nmax_routes = 0\n").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_rejects_bad_glob() {
        let mut config = Config::default();
        config.detection.ignore = vec!["[".to_string()];
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidIgnorePattern { .. })
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_route_options() {
        let mut config = Config::default();
        config.detection.max_routes = 8;
        config.detection.diff_target = Some("main...HEAD".to_string());

        let options = config.detection.route_options();
        assert_eq!(options.max_routes(), 8);
        assert_eq!(options.framework, None);
        assert_eq!(options.diff_target.as_deref(), Some("main...HEAD"));
    }
}
