//! Builder pattern for setting up a logger factory.
//!
//! This module provides a convenient builder API for collecting configuration
//! documents and producing a configured [`LoggerFactory`] in a single chain of
//! method calls.
//!
//! # Example
//!
//! ```rust
//! use lazylog_tree::{Level, LogConfigEntry};
//!
//! let factory = lazylog_tree::builder()
//!     .with_default_level(Level::Info)
//!     .with_logger("db", LogConfigEntry::new().with_level(Level::Warning).with_format("simple"))
//!     .build()
//!     .expect("Failed to configure loggers");
//!
//! let logger = factory.get_logger("db.pool").expect("logger");
//! assert_eq!(logger.level(), Level::Warning);
//! ```

use crate::autoload;
use crate::config::EntryValue;
use crate::handler::HandlerValue;
use crate::{Level, LogConfig, LoggerFactory, Result};

/// A builder for configuring a [`LoggerFactory`].
///
/// Every `with_*` call adds one document; documents are applied in the
/// order they were added, followed by the environment's documents when
/// [`with_env`](Self::with_env) is enabled.
#[derive(Debug, Clone, Default)]
pub struct LogBuilder {
    configs: Vec<LogConfig>,
    env: bool,
}

impl LogBuilder {
    /// Create a LogBuilder with no documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a whole document.
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.configs.push(config);
        self
    }

    /// Set the root logger's level.
    pub fn with_default_level(self, level: Level) -> Self {
        self.with_config(LogConfig::new().with_default(level))
    }

    /// Set the root logger's entry.
    pub fn with_default(self, entry: impl Into<EntryValue>) -> Self {
        self.with_config(LogConfig::new().with_default(entry))
    }

    /// Set a logger's entry.
    pub fn with_logger(self, name: impl Into<String>, entry: impl Into<EntryValue>) -> Self {
        self.with_config(LogConfig::new().with_logger(name, entry))
    }

    /// Register a named handler.
    pub fn with_handler(self, name: impl Into<String>, handler: impl Into<HandlerValue>) -> Self {
        self.with_config(LogConfig::new().with_handler(name, handler))
    }

    /// Also apply the documents found in the environment (see
    /// [`autoload`](crate::autoload)).
    pub fn with_env(mut self, enabled: bool) -> Self {
        self.env = enabled;
        self
    }

    /// The documents collected so far, without the environment's.
    pub fn configs(&self) -> &[LogConfig] {
        &self.configs
    }

    /// Build the factory with every collected document applied.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An environment document cannot be read or parsed
    /// - The root's pipeline references an invalid handler
    pub fn build(self) -> Result<LoggerFactory> {
        let mut configs = self.configs;
        if self.env {
            configs.extend(autoload::from_env()?);
        }
        let factory = LoggerFactory::new();
        factory.configure(configs)?;
        Ok(factory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogConfigEntry;
    use crate::handler::handler;

    #[test]
    fn test_builder_new() {
        let builder = LogBuilder::new();
        assert!(builder.configs().is_empty());
        let factory = builder.build().unwrap();
        assert_eq!(factory.root().level(), Level::Debug);
    }

    #[test]
    fn test_builder_with_default_level() {
        let factory = LogBuilder::new()
            .with_default_level(Level::Error)
            .build()
            .unwrap();
        assert_eq!(factory.root().level(), Level::Error);
        assert_eq!(factory.get_logger("a").unwrap().level(), Level::Error);
    }

    #[test]
    fn test_builder_chaining_later_wins() {
        let factory = LogBuilder::new()
            .with_logger("a", Level::Info)
            .with_logger("a", LogConfigEntry::new().with_level(Level::Warning))
            .build()
            .unwrap();
        assert_eq!(factory.get_logger("a").unwrap().level(), Level::Warning);
    }

    #[test]
    fn test_builder_with_handler() {
        let builder = LogBuilder::new()
            .with_handler("noop", handler(|_| Ok(())))
            .with_default(LogConfigEntry::new().with_output("noop"));
        assert_eq!(builder.configs().len(), 2);
        let factory = builder.build().unwrap();
        assert!(factory.effective_config().handlers.contains_key("noop"));
    }
}
