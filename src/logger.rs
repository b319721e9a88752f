//! Logger nodes.
//!
//! Loggers form a tree rooted at the `default` logger. A child logger's level
//! and handler are each either a local override or delegated to its parent.
//! Delegation is resolved on every read, so a change to an ancestor is seen
//! immediately by every descendant without an override.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::config::DEFAULT_LOGGER;
use crate::handler::Handler;
use crate::{Level, Record, Result, outputs};

/// Anything that names a logger: a dotted string, or a value carrying a name.
pub trait Named {
    /// The dotted logger name.
    fn logger_name(&self) -> &str;
}

impl Named for str {
    fn logger_name(&self) -> &str {
        self
    }
}

impl Named for String {
    fn logger_name(&self) -> &str {
        self
    }
}

impl Named for Logger {
    fn logger_name(&self) -> &str {
        self.name()
    }
}

struct RootNode {
    level: Cell<Level>,
    handler: RefCell<Handler>,
}

impl RootNode {
    fn resolve_level(&self) -> Level {
        self.level.get()
    }

    fn resolve_handler(&self) -> Handler {
        Handler::clone(&self.handler.borrow())
    }
}

struct ChildNode {
    parent: Logger,
    level: Cell<Option<Level>>,
    handler: RefCell<Option<Handler>>,
}

impl ChildNode {
    fn resolve_level(&self) -> Level {
        match self.level.get() {
            Some(level) => level,
            None => self.parent.level(),
        }
    }

    fn resolve_handler(&self) -> Handler {
        match &*self.handler.borrow() {
            Some(handler) => Handler::clone(handler),
            None => self.parent.handler(),
        }
    }
}

enum Node {
    Root(RootNode),
    Child(ChildNode),
}

struct Inner {
    name: String,
    node: Node,
}

/// A handle to a logger node. Cloning shares the node.
#[derive(Clone)]
pub struct Logger {
    inner: Rc<Inner>,
}

impl Logger {
    /// Create a standalone root logger at DEBUG, writing through the
    /// `console` output.
    pub fn root() -> Self {
        Self {
            inner: Rc::new(Inner {
                name: DEFAULT_LOGGER.to_string(),
                node: Node::Root(RootNode {
                    level: Cell::new(Level::Debug),
                    handler: RefCell::new(outputs::console()),
                }),
            }),
        }
    }

    /// Create a child logger delegating level and handler to `parent`.
    pub fn child(name: impl Into<String>, parent: &Logger) -> Self {
        Self {
            inner: Rc::new(Inner {
                name: name.into(),
                node: Node::Child(ChildNode {
                    parent: parent.clone(),
                    level: Cell::new(None),
                    handler: RefCell::new(None),
                }),
            }),
        }
    }

    /// Dotted name of this logger.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Parent logger, `None` for the root.
    pub fn parent(&self) -> Option<&Logger> {
        match &self.inner.node {
            Node::Root(_) => None,
            Node::Child(child) => Some(&child.parent),
        }
    }

    /// Whether this is a root logger.
    pub fn is_root(&self) -> bool {
        matches!(self.inner.node, Node::Root(_))
    }

    /// Effective level: the local override, else the parent's effective level.
    pub fn level(&self) -> Level {
        match &self.inner.node {
            Node::Root(root) => root.resolve_level(),
            Node::Child(child) => child.resolve_level(),
        }
    }

    /// Install a local level override.
    pub fn set_level(&self, level: Level) {
        match &self.inner.node {
            Node::Root(root) => root.level.set(level),
            Node::Child(child) => child.level.set(Some(level)),
        }
    }

    /// Remove the local level override so the parent's level applies.
    ///
    /// The root has nothing to delegate to and keeps its level.
    pub fn unset_level(&self) {
        if let Node::Child(child) = &self.inner.node {
            child.level.set(None);
        }
    }

    /// Effective handler: the local override, else the parent's effective
    /// handler. The root always has one.
    pub fn handler(&self) -> Handler {
        match &self.inner.node {
            Node::Root(root) => root.resolve_handler(),
            Node::Child(child) => child.resolve_handler(),
        }
    }

    /// Install a local handler override.
    pub fn set_handler(&self, handler: Handler) {
        self.assign_handler(Some(handler));
    }

    /// Remove the local handler override so the parent's handler applies.
    ///
    /// The root has nothing to delegate to and keeps its handler.
    pub fn unset_handler(&self) {
        self.assign_handler(None);
    }

    /// Apply both overrides at once; `None` delegates to the parent.
    ///
    /// A `None` level or handler leaves the root's unchanged.
    pub(crate) fn assign(&self, level: Option<Level>, handler: Option<Handler>) {
        match level {
            Some(level) => self.set_level(level),
            None => self.unset_level(),
        }
        self.assign_handler(handler);
    }

    fn assign_handler(&self, handler: Option<Handler>) {
        match &self.inner.node {
            Node::Root(root) => {
                if let Some(handler) = handler {
                    *root.handler.borrow_mut() = handler;
                }
            }
            Node::Child(child) => *child.handler.borrow_mut() = handler,
        }
    }

    /// Whether a record of `level` would pass this logger's threshold.
    pub fn enabled(&self, level: Level) -> bool {
        level != Level::Disabled && level >= self.level()
    }

    /// Emit a record at `level`.
    ///
    /// Nothing is built when the level is filtered out. Otherwise the record
    /// goes through the effective handler and the first handler failure is
    /// returned.
    pub fn log(
        &self,
        level: Level,
        message: impl Into<String>,
        args: &[&dyn fmt::Debug],
    ) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        let handler = self.handler();
        let mut record = Record::new(self, level, message, args);
        handler(&mut record)
    }

    /// Emit at DEBUG.
    pub fn debug(&self, message: impl Into<String>, args: &[&dyn fmt::Debug]) -> Result<()> {
        self.log(Level::Debug, message, args)
    }

    /// Emit at INFO.
    pub fn info(&self, message: impl Into<String>, args: &[&dyn fmt::Debug]) -> Result<()> {
        self.log(Level::Info, message, args)
    }

    /// Emit at WARNING.
    pub fn warn(&self, message: impl Into<String>, args: &[&dyn fmt::Debug]) -> Result<()> {
        self.log(Level::Warning, message, args)
    }

    /// Emit at ERROR.
    pub fn error(&self, message: impl Into<String>, args: &[&dyn fmt::Debug]) -> Result<()> {
        self.log(Level::Error, message, args)
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .finish()
    }
}
