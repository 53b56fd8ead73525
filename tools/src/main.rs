//! sales-report: generate, analyze and chart a synthetic sales dataset.
//!
//! Usage:
//!   sales-report
//!
//! Takes no arguments. Charts are written to the working directory;
//! log verbosity follows RUST_LOG.

use anyhow::{Context, Result};
use sales_core::{config::AnalysisConfig, pipeline::SalesPipeline, render::HeadlessDisplay};
use std::io;

fn main() -> Result<()> {
    env_logger::init();

    let config = AnalysisConfig::standard();
    log::info!(
        "sales-report: seed={} transactions={}",
        config.seed,
        config.n_transactions
    );

    let display = HeadlessDisplay;
    let pipeline = SalesPipeline::new(config, ".", &display);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let output = pipeline.run(&mut out).context("sales analysis run failed")?;

    log::info!("wrote {} charts", output.charts.len());
    Ok(())
}
