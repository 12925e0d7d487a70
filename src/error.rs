use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown framework '{0}' (expected nextjs-app, nextjs-pages or generic)")]
    UnknownFramework(String),

    #[error("max routes must be at least 1, got {0}")]
    InvalidMaxRoutes(usize),

    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("unknown output format '{0}' (expected json, table or markdown)")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
