//! Configuration documents from the process environment.
//!
//! Two variables are consulted:
//!
//! - `LAZYLOG_TREE_FILES`: comma-separated paths to configuration documents.
//!   Files ending in `.toml` are parsed as TOML, anything else as JSON.
//! - `LAZYLOG_TREE`: an inline JSON document.
//!
//! File documents come first in the listed order and the inline document
//! last, so the inline document has the highest priority.

use std::path::Path;

use crate::{LogConfig, LoggerFactory, Result};

/// Variable holding an inline JSON document.
pub const INLINE_VAR: &str = "LAZYLOG_TREE";
/// Variable holding comma-separated document paths.
pub const FILES_VAR: &str = "LAZYLOG_TREE_FILES";

/// Load the documents described by the two variable values.
pub fn load(inline: Option<&str>, files: Option<&str>) -> Result<Vec<LogConfig>> {
    let mut configs = Vec::new();
    if let Some(files) = files {
        for path in files.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            configs.push(load_file(Path::new(path))?);
        }
    }
    if let Some(inline) = inline
        && !inline.trim().is_empty()
    {
        configs.push(LogConfig::from_json(inline)?);
    }
    Ok(configs)
}

/// Load the documents named by the environment.
pub fn from_env() -> Result<Vec<LogConfig>> {
    let inline = std::env::var(INLINE_VAR).ok();
    let files = std::env::var(FILES_VAR).ok();
    load(inline.as_deref(), files.as_deref())
}

/// Apply the environment's documents to `factory`.
///
/// Returns whether any document was found; the factory is left alone when
/// there was none.
pub fn configure_from_env(factory: &LoggerFactory) -> Result<bool> {
    let configs = from_env()?;
    if configs.is_empty() {
        return Ok(false);
    }
    tracing::debug!(documents = configs.len(), "loaded configuration from environment");
    factory.configure(configs)?;
    Ok(true)
}

fn load_file(path: &Path) -> Result<LogConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        parse_toml(&content, path)
    } else {
        LogConfig::from_json(&content)
    }
}

#[cfg(feature = "toml")]
fn parse_toml(content: &str, _path: &Path) -> Result<LogConfig> {
    LogConfig::from_toml(content)
}

#[cfg(not(feature = "toml"))]
fn parse_toml(_content: &str, path: &Path) -> Result<LogConfig> {
    Err(crate::Error::Config(format!(
        "{}: TOML documents require the `toml` feature",
        path.display()
    )))
}
