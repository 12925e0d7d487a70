//! Project inspection: which routing convention a checkout uses.

mod framework;
mod fs;

pub use framework::{
    detect_framework, detect_project_layout, FrameworkDetector, ProjectLayout, MAX_SCAN_DEPTH,
    SKIP_DIRS,
};
pub use fs::{FileSystem, LocalFs};
