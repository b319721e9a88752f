//! Built-in output handlers.
//!
//! Outputs write the record's message followed by its arguments. Write
//! failures are returned to the emission call site.

use std::io::{self, Write};

use crate::Level;
use crate::handler::{Handler, handler};

/// Writes every record to standard output.
pub fn stdout() -> Handler {
    handler(|record| {
        writeln!(io::stdout().lock(), "{}", record.rendered())?;
        Ok(())
    })
}

/// Writes every record to standard error.
pub fn stderr() -> Handler {
    handler(|record| {
        writeln!(io::stderr().lock(), "{}", record.rendered())?;
        Ok(())
    })
}

/// Routes by level: DEBUG and INFO to standard output, WARNING and ERROR to
/// standard error.
pub fn console() -> Handler {
    handler(|record| {
        let line = record.rendered();
        if routes_to_stderr(record.level) {
            writeln!(io::stderr().lock(), "{}", line)?;
        } else {
            writeln!(io::stdout().lock(), "{}", line)?;
        }
        Ok(())
    })
}

/// Forwards every record as a `tracing` event carrying a `logger` field.
pub fn tracing() -> Handler {
    handler(|record| {
        let logger = record.logger.name();
        let line = record.rendered();
        match record.level {
            Level::Debug => tracing::debug!(logger, "{}", line),
            Level::Info => tracing::info!(logger, "{}", line),
            Level::Warning => tracing::warn!(logger, "{}", line),
            Level::Error => tracing::error!(logger, "{}", line),
            Level::Disabled => {}
        }
        Ok(())
    })
}

fn routes_to_stderr(level: Level) -> bool {
    level >= Level::Warning
}

/// Every built-in output, by configuration name.
pub fn all() -> Vec<(&'static str, Handler)> {
    vec![
        ("stdout", stdout()),
        ("stderr", stderr()),
        ("console", console()),
        ("tracing", tracing()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Logger, Record};

    #[test]
    fn test_console_routing() {
        assert!(!routes_to_stderr(Level::Debug));
        assert!(!routes_to_stderr(Level::Info));
        assert!(routes_to_stderr(Level::Warning));
        assert!(routes_to_stderr(Level::Error));
    }

    #[test]
    fn test_outputs_write_without_error() {
        let logger = Logger::root();
        for (_, output) in all() {
            let mut record = Record::new(&logger, Level::Info, "output test", &[]);
            assert!(output(&mut record).is_ok());
        }
    }

    #[test]
    fn test_outputs_leave_message_untouched() {
        let logger = Logger::root();
        let mut record = Record::new(&logger, Level::Error, "keep", &[]);
        console()(&mut record).unwrap();
        assert_eq!(record.message, "keep");
    }
}
