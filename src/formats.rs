//! Built-in format handlers. Each one rewrites the record's message in place.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::handler::{Handler, handler};

/// Leaves the record untouched.
pub fn none() -> Handler {
    handler(|_| Ok(()))
}

/// Prefixes the logger name: `"<name> <message>"`.
pub fn named() -> Handler {
    handler(|record| {
        record.message = format!("{} {}", record.logger.name(), record.message);
        Ok(())
    })
}

/// Prefixes level and logger name: `"<LEVEL> <name> <message>"`.
pub fn simple() -> Handler {
    handler(|record| {
        record.message = format!(
            "{} {} {}",
            record.level,
            record.logger.name(),
            record.message
        );
        Ok(())
    })
}

/// Prefixes an RFC 3339 UTC timestamp, level and logger name.
pub fn timed() -> Handler {
    handler(|record| {
        let now = OffsetDateTime::now_utc().format(&Rfc3339)?;
        record.message = format!(
            "{} {} {} {}",
            now,
            record.level,
            record.logger.name(),
            record.message
        );
        Ok(())
    })
}

/// Every built-in format, by configuration name.
pub fn all() -> Vec<(&'static str, Handler)> {
    vec![
        ("none", none()),
        ("named", named()),
        ("simple", simple()),
        ("timed", timed()),
    ]
}
