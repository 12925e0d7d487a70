use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use pre_post::analysis::FrameworkDetector;
use pre_post::config::{self, Config};
use pre_post::git::{ChangeSetProvider, GitChangeSet, StaticChangeSet};
use pre_post::output::OutputFormat;
use pre_post::pipeline::{detect_changed_routes, DetectRequest};
use pre_post::routes::Framework;
use pre_post::theme::Theme;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// pre-post - find the routes a change affects, for before/after screenshots
#[derive(Parser, Debug)]
#[command(name = "pre-post")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Config file to use instead of the one in the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect routes affected by the current change set
    Detect(DetectArgs),
    /// Print the framework detected for a project
    Framework {
        /// Project directory (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// List the files changed relative to the diff target
    Changed {
        /// Git diff target, e.g. "main...HEAD" or "HEAD~1"
        #[arg(long)]
        diff_target: Option<String>,

        /// Repository directory (defaults to the current directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug)]
struct DetectArgs {
    /// Force a framework (nextjs-app, nextjs-pages, generic)
    #[arg(long)]
    framework: Option<Framework>,

    /// Maximum number of routes to report (default: 5)
    #[arg(long, value_parser = parse_max_routes)]
    max_routes: Option<usize>,

    /// Git diff target, e.g. "main...HEAD" or "HEAD~1"
    #[arg(long)]
    diff_target: Option<String>,

    /// Use these files instead of asking git (comma-separated)
    #[arg(long, value_delimiter = ',')]
    files: Vec<String>,

    /// Project directory (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Output format (json, table, markdown)
    #[arg(long)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_max_routes(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(pre_post::Error::InvalidMaxRoutes(0).to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a positive integer", value)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => config::get_config_path()?,
    };

    match args.command {
        Command::Config { action } => run_config(action, &config_path),
        Command::Detect(detect) => {
            let config = load_config(&config_path)?;
            run_detect(detect, &config).await
        }
        Command::Framework { root } => run_framework(root),
        Command::Changed { diff_target, root } => {
            let config = load_config(&config_path)?;
            let diff_target = diff_target.or(config.detection.diff_target);
            run_changed(diff_target, root).await
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path)?;
    if !config.display.color_output {
        colored::control::set_override(false);
    }
    Ok(config)
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("Failed to read current directory"),
    }
}

async fn run_detect(args: DetectArgs, config: &Config) -> Result<()> {
    let root = resolve_root(args.root)?;
    let theme = Theme::named(config.display.theme);

    let mut options = config.detection.route_options();
    if args.framework.is_some() {
        options.framework = args.framework;
    }
    if args.max_routes.is_some() {
        options.max_routes = args.max_routes;
    }
    if args.diff_target.is_some() {
        options.diff_target = args.diff_target;
    }

    let request =
        DetectRequest::new(&root, options).with_ignore(config.detection.ignore_patterns()?);

    let provider: Box<dyn ChangeSetProvider> = if args.files.is_empty() {
        Box::new(GitChangeSet::new(&root))
    } else {
        Box::new(StaticChangeSet::new(args.files))
    };

    let report = detect_changed_routes(provider.as_ref(), &request).await;

    if let Some(truncation) = &report.truncation {
        eprintln!("{} {}", theme.warning.apply("Warning:"), truncation.message());
    }

    let format = args.format.unwrap_or(config.display.format);
    println!("{}", report.render(format, &theme)?.trim_end());
    Ok(())
}

fn run_framework(root: Option<PathBuf>) -> Result<()> {
    let root = resolve_root(root)?;
    let layout = FrameworkDetector::new().detect_layout(&root);

    println!("{}", layout.framework.to_string().green().bold());
    if !layout.project_root.as_os_str().is_empty() {
        println!("project root: {}", layout.project_root.display());
    }
    Ok(())
}

async fn run_changed(diff_target: Option<String>, root: Option<PathBuf>) -> Result<()> {
    let root = resolve_root(root)?;
    let files = GitChangeSet::new(&root)
        .changed_files(diff_target.as_deref())
        .await;

    if files.is_empty() {
        eprintln!("{}", "No changed files detected".yellow());
    }
    for file in files {
        println!("{}", file);
    }
    Ok(())
}

fn run_config(action: ConfigAction, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
        ConfigAction::Init { force } => {
            if config_path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at {:?}. Use --force to overwrite.",
                    config_path
                );
            }
            Config::create_default(config_path)?;
            println!("Created default config file at {:?}", config_path);
        }
    }
    Ok(())
}
