//! Resolution of user-supplied source text into something loadable.
//!
//! A source is either an `http`/`https`/`file` URL or a filesystem path.
//! File targets must exist at the time they are resolved.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

const URL_SCHEMES: &[&str] = &["http", "https", "file"];

/// A validated source for the content host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A network or `file:` URL, kept as the user wrote it.
    Url(String),
    /// An absolute, normalized path to an existing filesystem entry.
    Path(PathBuf),
}

impl Source {
    /// The URL the content host should navigate to.
    pub fn location(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Path(path) => file_url(path),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Why a source could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("no source given")]
    Empty,
    #[error("source not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Resolves relative paths and `~` against a fixed working directory and
/// home directory.
#[derive(Debug, Clone)]
pub struct Resolver {
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl Resolver {
    pub fn new(cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home,
        }
    }

    /// Uses the process working directory and the user's home directory.
    pub fn from_env() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(cwd, dirs::home_dir())
    }

    /// Parses `text` as a URL with a supported scheme, falling back to a
    /// filesystem path. Both `file:` URLs and paths must point at an
    /// existing entry.
    pub fn resolve(&self, text: &str) -> Result<Source, SourceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SourceError::Empty);
        }

        if let Some((scheme, rest)) = split_scheme(text) {
            return match scheme.as_str() {
                "file" => {
                    let path = file_url_to_path(rest)
                        .ok_or_else(|| SourceError::InvalidUrl(text.to_string()))?;
                    if path.exists() {
                        Ok(Source::Url(text.to_string()))
                    } else {
                        Err(SourceError::NotFound(path))
                    }
                }
                _ => {
                    validate_network_url(rest)
                        .ok_or_else(|| SourceError::InvalidUrl(text.to_string()))?;
                    Ok(Source::Url(text.to_string()))
                }
            };
        }

        self.resolve_path(Path::new(text))
    }

    /// Resolves a filesystem path without passing it through a string, so
    /// names that are not valid Unicode survive. The path must exist.
    pub fn resolve_path(&self, path: &Path) -> Result<Source, SourceError> {
        if path.as_os_str().is_empty() {
            return Err(SourceError::Empty);
        }
        let path = self.absolute(path);
        if path.exists() {
            Ok(Source::Path(path))
        } else {
            Err(SourceError::NotFound(path))
        }
    }

    /// Expands a leading `~`, joins relative paths onto the working
    /// directory, and collapses `.` and `..` lexically.
    fn absolute(&self, path: &Path) -> PathBuf {
        let expanded = match (strip_home(path), &self.home) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => path.to_path_buf(),
        };
        let joined = if expanded.is_absolute() {
            expanded
        } else {
            self.cwd.join(expanded)
        };
        normalize(&joined)
    }
}

/// Prefixes `https://` when the text has no scheme separator.
///
/// Returns `None` for blank input, which the URL dialog treats as cancel.
pub fn normalize_url_input(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text.contains("://") {
        Some(text.to_string())
    } else {
        Some(format!("https://{text}"))
    }
}

/// Splits off a supported, lowercased scheme.
fn split_scheme(text: &str) -> Option<(String, &str)> {
    let (scheme, rest) = text.split_once(':')?;
    let scheme = scheme.to_ascii_lowercase();
    URL_SCHEMES
        .contains(&scheme.as_str())
        .then_some((scheme, rest))
}

/// Requires `//host...` with a non-empty host and no whitespace.
fn validate_network_url(rest: &str) -> Option<()> {
    let after = rest.strip_prefix("//")?;
    let authority = after.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    if host.is_empty() || after.chars().any(char::is_whitespace) {
        return None;
    }
    Some(())
}

/// Converts the part of a `file:` URL after the scheme to a local path.
fn file_url_to_path(rest: &str) -> Option<PathBuf> {
    let rest = rest.split(['?', '#']).next().unwrap_or_default();

    let (host, path) = match rest.strip_prefix("//") {
        Some(after) => match after.find('/') {
            Some(i) => (&after[..i], &after[i..]),
            None => (after, ""),
        },
        None => ("", rest),
    };

    let decoded = urlencoding::decode(path).ok()?;
    let mut path = decoded.as_ref();
    if path.is_empty() {
        return None;
    }

    if cfg!(windows) && has_drive_prefix(path) {
        path = &path[1..];
    }

    if host.is_empty() || host.eq_ignore_ascii_case("localhost") {
        Some(PathBuf::from(path))
    } else {
        Some(PathBuf::from(format!("//{host}{path}")))
    }
}

/// Matches `/C:` style prefixes of Windows drive paths in URLs.
fn has_drive_prefix(path: &str) -> bool {
    let b = path.as_bytes();
    b.len() >= 3 && b[0] == b'/' && b[1].is_ascii_alphabetic() && b[2] == b':'
}

/// Returns the remainder after a leading `~` component, or `None` if the
/// path does not start with a home reference.
fn strip_home(path: &Path) -> Option<&Path> {
    let mut components = path.components();
    match components.next()? {
        Component::Normal(first) if first == "~" => Some(components.as_path()),
        _ => None,
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn file_url(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    let encoded: Vec<String> = text
        .split('/')
        .map(|segment| {
            // Keep drive letters like `C:` readable.
            if segment.len() == 2 && segment.ends_with(':') {
                segment.to_string()
            } else {
                urlencoding::encode(segment).into_owned()
            }
        })
        .collect();
    let joined = encoded.join("/");
    if joined.starts_with('/') {
        format!("file://{joined}")
    } else {
        format!("file:///{joined}")
    }
}
