use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{DEFAULT_LOGGER, EffectiveConfig, LogConfigEntry};
use crate::handler::{Handler, compose};
use crate::logger::Named;
use crate::{Error, Level, LogConfig, Logger, Result};

/// Owns the logger tree and the effective configuration.
///
/// Loggers are created on first request and live as long as the factory.
/// (Re)configuration pushes the new effective configuration to the root and
/// every logger created so far.
pub struct LoggerFactory {
    config: RefCell<EffectiveConfig>,
    root: Logger,
    loggers: RefCell<BTreeMap<String, Logger>>,
}

impl LoggerFactory {
    /// Create a factory using the built-in base configuration.
    pub fn new() -> Self {
        Self {
            config: RefCell::new(EffectiveConfig::base()),
            root: Logger::root(),
            loggers: RefCell::new(BTreeMap::new()),
        }
    }

    /// Merge `configs` into the current configuration, in ascending priority,
    /// and apply the result to every existing logger.
    ///
    /// # Errors
    ///
    /// Returns an error if a logger's pipeline references an invalid handler,
    /// or if none of the root's handler names resolves. Nothing is changed in
    /// that case.
    pub fn configure<I>(&self, configs: I) -> Result<()>
    where
        I: IntoIterator<Item = LogConfig>,
    {
        let mut config = self.config.borrow().clone();
        let merged = merge_all(&mut config, configs);
        tracing::debug!(documents = merged, "configuring loggers");
        self.apply(config)
    }

    /// Reset to the built-in base configuration, then merge `configs`.
    ///
    /// # Errors
    ///
    /// See [`configure`](Self::configure).
    pub fn reconfigure<I>(&self, configs: I) -> Result<()>
    where
        I: IntoIterator<Item = LogConfig>,
    {
        let mut config = EffectiveConfig::base();
        let merged = merge_all(&mut config, configs);
        tracing::debug!(documents = merged, "reconfiguring loggers");
        self.apply(config)
    }

    /// Get the logger for a dotted name, creating it and any missing ancestor.
    ///
    /// # Errors
    ///
    /// Returns an error if a newly created logger's configured pipeline
    /// references an invalid handler.
    pub fn get_logger<N: Named + ?Sized>(&self, name: &N) -> Result<Logger> {
        self.get_or_create(name.logger_name())
    }

    /// The root and every logger created so far, sorted by name.
    pub fn get_all_loggers(&self) -> Vec<Logger> {
        let mut loggers = vec![self.root.clone()];
        loggers.extend(self.loggers.borrow().values().cloned());
        loggers.sort_by(|a, b| a.name().cmp(b.name()));
        loggers
    }

    /// The root logger.
    pub fn root(&self) -> &Logger {
        &self.root
    }

    /// A snapshot of the effective configuration.
    pub fn effective_config(&self) -> EffectiveConfig {
        self.config.borrow().clone()
    }

    fn get_or_create(&self, name: &str) -> Result<Logger> {
        if name == DEFAULT_LOGGER {
            return Ok(self.root.clone());
        }
        if let Some(logger) = self.loggers.borrow().get(name) {
            return Ok(logger.clone());
        }

        let parent = self.get_or_create(parent_name(name))?;
        let logger = Logger::child(name, &parent);
        let (level, handler) = {
            let config = self.config.borrow();
            resolve(&config, &config.entry(name))?
        };
        logger.assign(level, handler);

        self.loggers
            .borrow_mut()
            .insert(name.to_string(), logger.clone());
        tracing::trace!(logger = name, parent = parent.name(), "created logger");
        Ok(logger)
    }

    // Every pipeline is built before anything is assigned, so a failure
    // leaves the previous configuration in place.
    fn apply(&self, config: EffectiveConfig) -> Result<()> {
        let (root_level, root_handler) = resolve(&config, &config.default)?;
        let Some(root_handler) = root_handler else {
            return Err(Error::Config(format!(
                "no handler of the `{}` logger resolves: {:?}",
                DEFAULT_LOGGER,
                config.default.handler_names()
            )));
        };
        let children = self
            .loggers
            .borrow()
            .iter()
            .map(|(name, logger)| {
                resolve(&config, &config.entry(name)).map(|resolved| (logger.clone(), resolved))
            })
            .collect::<Result<Vec<_>>>()?;

        self.root.assign(root_level, Some(root_handler));
        for (logger, (level, handler)) in &children {
            logger.assign(*level, handler.clone());
        }
        *self.config.borrow_mut() = config;

        tracing::debug!(loggers = children.len() + 1, "applied configuration");
        Ok(())
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerFactory")
            .field("loggers", &self.get_all_loggers())
            .finish()
    }
}

fn merge_all<I>(config: &mut EffectiveConfig, configs: I) -> usize
where
    I: IntoIterator<Item = LogConfig>,
{
    let mut merged = 0;
    for doc in configs {
        config.merge(doc);
        merged += 1;
    }
    merged
}

/// Name of the parent of a dotted logger name.
pub(crate) fn parent_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => DEFAULT_LOGGER,
    }
}

/// Level and handler overrides for a logger configured with `entry`.
fn resolve(
    config: &EffectiveConfig,
    entry: &LogConfigEntry,
) -> Result<(Option<Level>, Option<Handler>)> {
    Ok((entry.level, make_handler(config, entry)?))
}

fn make_handler(config: &EffectiveConfig, entry: &LogConfigEntry) -> Result<Option<Handler>> {
    let mut handlers = Vec::new();
    for name in entry.handler_names() {
        if name.is_empty() {
            continue;
        }
        match config.handlers.get(name) {
            Some(value) => handlers.push(value.to_handler(name)?),
            None => tracing::warn!(handler = name, "unknown log handler, skipping"),
        }
    }
    Ok(compose(handlers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{HandlerValue, handler};
    use crate::LogConfigEntry;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_parent_name() {
        assert_eq!(parent_name("a.b.c"), "a.b");
        assert_eq!(parent_name("a.b"), "a");
        assert_eq!(parent_name("a"), DEFAULT_LOGGER);
        assert_eq!(parent_name(".a"), DEFAULT_LOGGER);
        assert_eq!(parent_name("a..b"), "a.");
        assert_eq!(parent_name("a."), "a");
    }

    #[test]
    fn test_default_level_is_debug() {
        let factory = LoggerFactory::new();
        let logger = factory.get_logger("test").unwrap();
        assert_eq!(logger.level(), Level::Debug);
    }

    #[test]
    fn test_root_name_returns_root() {
        let factory = LoggerFactory::new();
        let root = factory.get_logger(DEFAULT_LOGGER).unwrap();
        assert!(root.is_root());
        assert_eq!(&root, factory.root());
    }

    #[test]
    fn test_loggers_are_memoized() {
        let factory = LoggerFactory::new();
        let a = factory.get_logger("a.b").unwrap();
        let b = factory.get_logger(&String::from("a.b")).unwrap();
        assert_eq!(a, b);
        assert_eq!(factory.get_logger(&a).unwrap(), a);
    }

    #[test]
    fn test_unknown_handler_names_are_dropped() {
        let factory = LoggerFactory::new();
        factory
            .configure([LogConfig::new().with_logger(
                "x",
                LogConfigEntry::new().with_format("missing").with_output("absent"),
            )])
            .unwrap();
        let x = factory.get_logger("x").unwrap();
        // nothing resolved, so the root's pipeline applies
        assert!(Arc::ptr_eq(&x.handler(), &factory.root().handler()));
    }

    #[test]
    fn test_single_handler_is_installed_unchanged() {
        let sink = handler(|_| Ok(()));
        let factory = LoggerFactory::new();
        factory
            .configure([LogConfig::new()
                .with_handler("only", Arc::clone(&sink))
                .with_logger("x", LogConfigEntry::new().with_output("only"))])
            .unwrap();
        let x = factory.get_logger("x").unwrap();
        assert!(Arc::ptr_eq(&x.handler(), &sink));
    }

    #[test]
    fn test_invalid_handler_fails_and_keeps_state() {
        let factory = LoggerFactory::new();
        let x = factory.get_logger("x").unwrap();
        let bad = LogConfig::new()
            .with_handler("bad", HandlerValue::Unsupported(serde_json::json!(1)))
            .with_logger("x", LogConfigEntry::new().with_level(Level::Error).with_output("bad"));

        let err = factory.configure([bad]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(x.level(), Level::Debug);
        assert!(!factory.effective_config().handlers.contains_key("bad"));
    }

    #[test]
    fn test_invalid_handler_fails_on_creation() {
        let factory = LoggerFactory::new();
        // "y" does not exist yet, so nothing is composed here
        factory
            .configure([LogConfig::from_json(
                r#"{"handlers": {"bad": {}}, "loggers": {"y": {"output": "bad"}}}"#,
            )
            .unwrap()])
            .unwrap();
        assert!(matches!(factory.get_logger("y"), Err(Error::Config(_))));
        assert!(factory.get_logger("other").is_ok());
    }

    #[test]
    fn test_unresolvable_root_pipeline_is_rejected() {
        let factory = LoggerFactory::new();
        let child = factory.get_logger("svc").unwrap();
        let before = factory.root().handler();

        let err = factory
            .configure([LogConfig::new().with_default(
                LogConfigEntry::new()
                    .with_level(Level::Error)
                    .with_format("nope")
                    .with_output("gone"),
            )])
            .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert!(Arc::ptr_eq(&factory.root().handler(), &before));
        assert_eq!(factory.root().level(), Level::Debug);
        assert_eq!(child.level(), Level::Debug);
        assert_eq!(factory.effective_config().default.output.as_deref(), Some("console"));
    }

    #[test]
    fn test_default_entry_applies_to_root() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let factory = LoggerFactory::new();
        factory
            .configure([LogConfig::new()
                .with_handler(
                    "collect",
                    handler(move |record| {
                        sink.lock().unwrap().push(record.message.clone());
                        Ok(())
                    }),
                )
                .with_default(
                    LogConfigEntry::new()
                        .with_level(Level::Info)
                        .with_format("named")
                        .with_output("collect"),
                )])
            .unwrap();

        let child = factory.get_logger("svc").unwrap();
        child.debug("hidden", &[]).unwrap();
        child.info("shown", &[]).unwrap();

        assert_eq!(factory.root().level(), Level::Info);
        assert_eq!(*seen.lock().unwrap(), vec!["svc shown"]);
    }
}
