//! Handler adaptation and composition.
//!
//! A handler is anything that consumes a [`Record`]: a format stage that
//! rewrites the message, an output that writes it somewhere, or any custom
//! hook. Configuration documents carry handlers as [`HandlerValue`]s, which
//! are normalized into the one canonical [`Handler`] shape before a logger's
//! pipeline is composed.

use std::fmt;
use std::sync::Arc;

use crate::{Error, Record, Result};

/// The canonical callable handler shape.
///
/// Handlers are `Send + Sync` because the built-in ones live in a
/// process-wide static shared by every factory, even though loggers
/// themselves are single-threaded.
pub type Handler = Arc<dyn Fn(&mut Record<'_>) -> Result<()> + Send + Sync>;

/// An object exposing a single handling capability.
///
/// `Send + Sync` for the same reason as [`Handler`].
pub trait Handle: Send + Sync {
    /// Process one record.
    fn handle(&self, record: &mut Record<'_>) -> Result<()>;
}

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut Record<'_>) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A handler as it appears in a configuration document.
#[derive(Clone)]
pub enum HandlerValue {
    /// A bare callable.
    Callable(Handler),
    /// An object implementing [`Handle`].
    Object(Arc<dyn Handle>),
    /// Any other value, e.g. a JSON value from a deserialized document.
    /// Rejected when a pipeline references it.
    Unsupported(serde_json::Value),
}

impl HandlerValue {
    /// Wrap a closure.
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&mut Record<'_>) -> Result<()> + Send + Sync + 'static,
    {
        HandlerValue::Callable(Arc::new(f))
    }

    /// Wrap a capability object.
    pub fn object<H: Handle + 'static>(object: H) -> Self {
        HandlerValue::Object(Arc::new(object))
    }

    /// Normalize into the canonical callable shape.
    ///
    /// A callable is returned as is, an object is wrapped in a forwarding
    /// closure. Anything else is a configuration error naming `name`.
    pub fn to_handler(&self, name: &str) -> Result<Handler> {
        match self {
            HandlerValue::Callable(handler) => Ok(Arc::clone(handler)),
            HandlerValue::Object(object) => {
                let object = Arc::clone(object);
                Ok(Arc::new(move |record: &mut Record<'_>| object.handle(record)))
            }
            HandlerValue::Unsupported(value) => Err(Error::Config(format!(
                "invalid log handler `{}`: {}",
                name, value
            ))),
        }
    }
}

impl From<Handler> for HandlerValue {
    fn from(handler: Handler) -> Self {
        HandlerValue::Callable(handler)
    }
}

impl fmt::Debug for HandlerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerValue::Callable(_) => f.write_str("Callable"),
            HandlerValue::Object(_) => f.write_str("Object"),
            HandlerValue::Unsupported(value) => f.debug_tuple("Unsupported").field(value).finish(),
        }
    }
}

// Documents can only ever carry data, so every deserialized handler value is
// kept as `Unsupported` and rejected at composition time.
impl<'de> serde::Deserialize<'de> for HandlerValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(HandlerValue::Unsupported)
    }
}

/// Runs its delegates in order against the same record.
///
/// The first failing delegate aborts the chain and its error is returned.
pub struct CompositeHandler {
    delegates: Vec<Handler>,
}

impl CompositeHandler {
    /// Create a composite over `delegates`, invoked in the given order.
    pub fn new(delegates: Vec<Handler>) -> Self {
        Self { delegates }
    }
}

impl Handle for CompositeHandler {
    fn handle(&self, record: &mut Record<'_>) -> Result<()> {
        for delegate in &self.delegates {
            delegate(record)?;
        }
        Ok(())
    }
}

/// Combine handlers into one.
///
/// Zero handlers yield `None`, a single handler is returned unchanged, and
/// two or more are chained through a [`CompositeHandler`].
pub fn compose(mut handlers: Vec<Handler>) -> Option<Handler> {
    match handlers.len() {
        0 => None,
        1 => handlers.pop(),
        _ => {
            let composite = CompositeHandler::new(handlers);
            Some(Arc::new(move |record: &mut Record<'_>| composite.handle(record)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Level, Logger};
    use std::sync::Mutex;

    fn recording(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Handler {
        let log = Arc::clone(log);
        handler(move |record| {
            log.lock().unwrap().push(format!("{}:{}", tag, record.message));
            Ok(())
        })
    }

    struct Upper;

    impl Handle for Upper {
        fn handle(&self, record: &mut Record<'_>) -> Result<()> {
            record.message = record.message.to_uppercase();
            Ok(())
        }
    }

    #[test]
    fn test_compose_empty() {
        assert!(compose(Vec::new()).is_none());
    }

    #[test]
    fn test_compose_single_is_identity() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let single = recording(&log, "a");
        let composed = compose(vec![Arc::clone(&single)]).unwrap();
        assert!(Arc::ptr_eq(&single, &composed));
    }

    #[test]
    fn test_compose_runs_in_order_on_same_record() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let upper = HandlerValue::object(Upper).to_handler("upper").unwrap();
        let composed = compose(vec![upper, recording(&log, "a"), recording(&log, "b")]).unwrap();

        let logger = Logger::root();
        let mut record = Record::new(&logger, Level::Info, "hi", &[]);
        composed(&mut record).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["a:HI", "b:HI"]);
        assert_eq!(record.message, "HI");
    }

    #[test]
    fn test_compose_aborts_on_failure() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let failing = handler(|_| Err(Error::Handler("boom".to_string())));
        let composed =
            compose(vec![recording(&log, "a"), failing, recording(&log, "b")]).unwrap();

        let logger = Logger::root();
        let mut record = Record::new(&logger, Level::Error, "x", &[]);
        let err = composed(&mut record).unwrap_err();

        assert!(matches!(err, Error::Handler(ref m) if m == "boom"));
        assert_eq!(*log.lock().unwrap(), vec!["a:x"]);
    }

    #[test]
    fn test_callable_adapts_to_same_handler() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let h = recording(&log, "a");
        let adapted = HandlerValue::from(Arc::clone(&h)).to_handler("a").unwrap();
        assert!(Arc::ptr_eq(&h, &adapted));
    }

    #[test]
    fn test_unsupported_value_is_config_error() {
        let value: HandlerValue = serde_json::from_str("{\"handle\": 1}").unwrap();
        match value.to_handler("bogus") {
            Err(Error::Config(message)) => assert!(message.contains("`bogus`")),
            Err(other) => panic!("unexpected error: {:?}", other),
            Ok(_) => panic!("unsupported handler value was accepted"),
        }
    }
}
