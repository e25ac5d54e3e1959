//! Terrella Viewer - Main entry point
//!
//! Native desktop viewer for the interactive globe.

mod app;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "terrella")]
#[command(about = "Interactive globe with geo-anchored location markers")]
#[command(version)]
struct Args {
    /// Globe spin rate in radians per second
    #[arg(long, default_value_t = 0.0)]
    spin: f32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Terrella v{}", env!("CARGO_PKG_VERSION"));

    app::run(&args);

    Ok(())
}
