//! Example of loading logger configuration from a TOML file.
//!
//! Run with:
//! ```bash
//! cargo run --example config_toml
//! ```

use std::fs;

use lazylog_tree::{LogConfig, LoggerFactory};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = "demos/config.toml";
    let config_content = fs::read_to_string(config_path)?;

    let factory = LoggerFactory::new();
    factory.configure([LogConfig::from_toml(&config_content)?])?;

    let http = factory.get_logger("net.http")?;
    http.debug("This is a debug message (filtered out)", &[])?;
    http.info("Request served", &[&"GET", &"/index.html", &200])?;

    let dns = factory.get_logger("net.dns")?;
    dns.warn("Slow lookup", &[&"example.com"])?;

    // Drop back to the built-in defaults
    factory.reconfigure(Vec::<LogConfig>::new())?;
    http.debug("Visible again after reconfigure", &[])?;

    Ok(())
}
