use std::fmt;

use crate::{Level, Logger};

/// A single log event, built fresh for every emission that passes the level
/// filter and handed to the logger's effective handler.
///
/// The same record is passed to every stage of a composed handler. Format
/// stages may rewrite `message` in place so that later stages, usually the
/// output, observe the decorated text.
pub struct Record<'a> {
    /// The logger the record was emitted on.
    pub logger: &'a Logger,
    /// Severity of the record. Never [`Level::Disabled`].
    pub level: Level,
    /// The message, possibly decorated by format stages.
    pub message: String,
    /// Extra values passed alongside the message, in call order.
    pub args: &'a [&'a dyn fmt::Debug],
}

impl<'a> Record<'a> {
    /// Create a record.
    pub fn new(
        logger: &'a Logger,
        level: Level,
        message: impl Into<String>,
        args: &'a [&'a dyn fmt::Debug],
    ) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            args,
        }
    }

    /// The message followed by every argument's `Debug` rendering, separated
    /// by single spaces.
    pub fn rendered(&self) -> String {
        let mut line = self.message.clone();
        for arg in self.args {
            line.push(' ');
            line.push_str(&format!("{:?}", arg));
        }
        line
    }
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("logger", &self.logger.name())
            .field("level", &self.level)
            .field("message", &self.message)
            .field("args", &self.args)
            .finish()
    }
}
