use glasspane_core::{Resolver, Source, SourceError};
use thiserror::Error;

/// Failures that stop the overlay before a window exists.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid startup source: {0}")]
    InvalidStartupSource(#[from] SourceError),
    #[cfg_attr(windows, allow(dead_code))]
    #[error("Glasspane currently only runs on Windows")]
    UnsupportedPlatform,
    #[cfg_attr(not(windows), allow(dead_code))]
    #[error("{0}")]
    Host(String),
}

/// Picks the startup text: the positional source wins over `--html`.
pub fn source_text<'a>(positional: Option<&'a str>, html: &'a str) -> &'a str {
    positional.unwrap_or(html)
}

/// Resolves the startup source against the working directory.
pub fn resolve(text: &str) -> Result<Source, StartupError> {
    Ok(Resolver::from_env().resolve(text)?)
}
