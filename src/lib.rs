pub mod analysis;
pub mod config;
pub mod error;
pub mod git;
pub mod output;
pub mod pipeline;
pub mod routes;
pub mod theme;

// Re-export commonly used types
pub use analysis::{detect_framework, FrameworkDetector, ProjectLayout};
pub use config::Config;
pub use error::Error;
pub use git::{ChangeSetProvider, GitChangeSet, StaticChangeSet};
pub use output::{DetectionReport, OutputFormat};
pub use routes::{
    detect_app_router_routes, detect_generic_routes, detect_pages_router_routes, detect_routes,
    detect_routes_in, detect_routes_with, Confidence, DetectedRoute, Framework, RouteDetection,
    RouteDetectionOptions,
};
