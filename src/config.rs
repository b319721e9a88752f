use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::handler::HandlerValue;
use crate::{Level, Result, formats, outputs};

/// Name of the root logger.
pub const DEFAULT_LOGGER: &str = "default";

/// Configuration for a single logger, or for the root under `default`.
///
/// Every field is optional; unset fields are inherited from the parent logger
/// (level), or leave the handler pipeline to the parent when none of
/// `format`, `handlers` and `output` resolve to a handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfigEntry {
    /// Threshold level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    /// Name of the format handler, run first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Name of the output handler, run last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Names of handlers run between format and output, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handlers: Option<Vec<String>>,
}

impl LogConfigEntry {
    /// Create an empty entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Set level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Set format handler name
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set output handler name
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Set intermediate handler names
    pub fn with_handlers<I, S>(mut self, handlers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handlers = Some(handlers.into_iter().map(Into::into).collect());
        self
    }

    /// Overwrite every field `other` specifies, keeping the rest.
    pub fn merge_from(&mut self, other: LogConfigEntry) {
        if other.level.is_some() {
            self.level = other.level;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
        if other.handlers.is_some() {
            self.handlers = other.handlers;
        }
    }

    /// Handler names in pipeline order: format, handlers, output.
    pub fn handler_names(&self) -> Vec<&str> {
        self.format
            .iter()
            .map(String::as_str)
            .chain(self.handlers.iter().flatten().map(String::as_str))
            .chain(self.output.iter().map(String::as_str))
            .collect()
    }
}

/// An entry as written in a document: either a bare level name or a
/// structured entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    /// Shorthand for `{ level }`.
    Level(Level),
    /// A structured entry.
    Entry(LogConfigEntry),
}

impl EntryValue {
    /// Expand the shorthand form into a structured entry.
    pub fn expand(self) -> LogConfigEntry {
        match self {
            EntryValue::Level(level) => LogConfigEntry::new().with_level(level),
            EntryValue::Entry(entry) => entry,
        }
    }
}

impl From<Level> for EntryValue {
    fn from(level: Level) -> Self {
        EntryValue::Level(level)
    }
}

impl From<LogConfigEntry> for EntryValue {
    fn from(entry: LogConfigEntry) -> Self {
        EntryValue::Entry(entry)
    }
}

/// A partial configuration document.
///
/// Documents are merged in ascending priority into the
/// [`EffectiveConfig`]; see [`LoggerFactory::configure`](crate::LoggerFactory::configure).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    /// Named handlers, added to the shared mapping
    #[serde(default)]
    pub handlers: HashMap<String, HandlerValue>,
    /// Entry for the root logger
    #[serde(default)]
    pub default: Option<EntryValue>,
    /// Entries by dotted logger name
    #[serde(default)]
    pub loggers: BTreeMap<String, EntryValue>,
}

impl LogConfig {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named handler
    pub fn with_handler(mut self, name: impl Into<String>, handler: impl Into<HandlerValue>) -> Self {
        self.handlers.insert(name.into(), handler.into());
        self
    }

    /// Set the root logger's entry
    pub fn with_default(mut self, entry: impl Into<EntryValue>) -> Self {
        self.default = Some(entry.into());
        self
    }

    /// Set a logger's entry
    pub fn with_logger(mut self, name: impl Into<String>, entry: impl Into<EntryValue>) -> Self {
        self.loggers.insert(name.into(), entry.into());
        self
    }

    /// Parse a JSON document
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a TOML document
    #[cfg(feature = "toml")]
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Rewrite every shorthand entry into its structured form.
    pub fn expand(self) -> ExpandedConfig {
        ExpandedConfig {
            handlers: self.handlers,
            default: self.default.map(EntryValue::expand),
            loggers: self
                .loggers
                .into_iter()
                .map(|(name, entry)| (name, entry.expand()))
                .collect(),
        }
    }
}

/// A document with every shorthand expanded.
#[derive(Debug, Clone, Default)]
pub struct ExpandedConfig {
    pub handlers: HashMap<String, HandlerValue>,
    pub default: Option<LogConfigEntry>,
    pub loggers: BTreeMap<String, LogConfigEntry>,
}

/// The merged configuration every logger is (re)computed from.
///
/// `default` is always fully populated, since every effective configuration
/// starts from [`EffectiveConfig::base`].
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    /// Flat name to handler mapping
    pub handlers: HashMap<String, HandlerValue>,
    /// Root entry
    pub default: LogConfigEntry,
    /// Entries by dotted logger name
    pub loggers: BTreeMap<String, LogConfigEntry>,
}

static BASE: Lazy<EffectiveConfig> = Lazy::new(|| EffectiveConfig {
    handlers: formats::all()
        .into_iter()
        .chain(outputs::all())
        .map(|(name, handler)| (name.to_string(), HandlerValue::Callable(handler)))
        .collect(),
    default: LogConfigEntry::new()
        .with_level(Level::Debug)
        .with_format("none")
        .with_handlers(Vec::<String>::new())
        .with_output("console"),
    loggers: BTreeMap::new(),
});

impl EffectiveConfig {
    /// A fresh copy of the built-in base configuration.
    pub fn base() -> Self {
        BASE.clone()
    }

    /// Merge one document on top of this configuration.
    ///
    /// Handlers are added or replaced by name. The default entry and each
    /// named logger entry are merged field by field, so fields the document
    /// leaves out keep their previous value.
    pub fn merge(&mut self, config: LogConfig) {
        let expanded = config.expand();
        self.handlers.extend(expanded.handlers);
        if let Some(default) = expanded.default {
            self.default.merge_from(default);
        }
        for (name, entry) in expanded.loggers {
            self.loggers.entry(name).or_default().merge_from(entry);
        }
    }

    /// The entry for a logger name, empty when none was configured.
    pub fn entry(&self, name: &str) -> LogConfigEntry {
        self.loggers.get(name).cloned().unwrap_or_default()
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self::base()
    }
}
