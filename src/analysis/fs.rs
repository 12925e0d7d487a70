use std::path::Path;
use walkdir::WalkDir;

/// Read-only view of the filesystem used by framework detection.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    /// Names of the immediate subdirectories of `path`. Unreadable or
    /// missing directories yield an empty list.
    fn list_directories(&self, path: &Path) -> Vec<String>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn list_directories(&self, path: &Path) -> Vec<String> {
        (**self).list_directories(path)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_directories(&self, path: &Path) -> Vec<String> {
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(String::from))
            .collect()
    }
}
