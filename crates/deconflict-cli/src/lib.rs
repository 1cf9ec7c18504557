//! Deconflict CLI - command line tools for the deconfliction engine.
//!
//! Binaries:
//! - deconflict: check mission files, run the demo catalogue
//! - deconflict_stress: evaluate a primary against random traffic

pub mod config;
pub mod input;
pub mod report;
pub mod sim;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use config::Config;

/// Install the global subscriber. Logs go to stderr so report output stays clean.
///
/// `RUST_LOG` directives are honored; the engine and CLI default to `info`.
pub fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("deconflict_core=info".parse()?)
        .add_directive("deconflict_cli=info".parse()?);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}
