//! # Lazylog Tree
//!
//! Hierarchical, runtime-reconfigurable loggers.
//!
//! ## Features
//!
//! - A tree of dotted-name loggers inheriting level and handler from their
//!   ancestors unless overridden
//! - Layered configuration: partial documents merged in ascending priority
//! - Composable handler pipelines (format, custom handlers, output)
//! - Built-in formats and console/stream outputs, plus a `tracing` bridge
//! - Configuration from JSON/TOML documents and the environment
//!
//! ## Example
//!
//! ```rust
//! use lazylog_tree::{Level, LogConfig, LogConfigEntry, LoggerFactory};
//!
//! let factory = LoggerFactory::new();
//! factory.configure([LogConfig::new()
//!     .with_default(Level::Info)
//!     .with_logger("net", LogConfigEntry::new().with_format("simple").with_output("stderr"))])?;
//!
//! let logger = factory.get_logger("net.http")?;
//! logger.info("listening", &[&8080])?;
//! logger.debug("filtered out", &[])?;
//! # Ok::<(), lazylog_tree::Error>(())
//! ```

pub mod autoload;
pub mod builder;
pub mod config;
pub mod error;
pub mod factory;
pub mod formats;
pub mod handler;
pub mod level;
pub mod logger;
pub mod outputs;
pub mod record;

pub use builder::LogBuilder;
pub use config::{DEFAULT_LOGGER, EffectiveConfig, EntryValue, LogConfig, LogConfigEntry};
pub use error::{Error, Result};
pub use factory::LoggerFactory;
pub use handler::{Handle, Handler, HandlerValue, compose};
pub use level::Level;
pub use logger::{Logger, Named};
pub use record::Record;

/// Create a new [`LogBuilder`].
pub fn builder() -> LogBuilder {
    LogBuilder::new()
}
