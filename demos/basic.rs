//! Basic hierarchical logging example.
//!
//! This example demonstrates configuring a factory with the builder API and
//! how child loggers inherit from their ancestors.

use lazylog_tree::{Level, LogConfigEntry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let factory = lazylog_tree::builder()
        .with_default(
            LogConfigEntry::new()
                .with_level(Level::Info)
                .with_format("simple"),
        )
        .with_logger("app.db", Level::Warning)
        .with_env(true)
        .build()?;

    let app = factory.get_logger("app")?;
    let db = factory.get_logger("app.db.pool")?;

    app.debug("This is a debug message (filtered out)", &[])?;
    app.info("This is an info message", &[])?;
    app.warn("This is a warning message", &[&"disk", &93])?;
    db.info("Pool ready (filtered out, app.db is at WARNING)", &[])?;
    db.error("Connection failed", &[&"timeout"])?;

    for logger in factory.get_all_loggers() {
        println!("{:<12} {}", logger.name(), logger.level());
    }

    Ok(())
}
