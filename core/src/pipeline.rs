//! The analysis pipeline: one forward pass per run.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Generator   synthetic transactions from the master seed
//!   2. Cleaner     missing-value scan, date normalization, type report
//!   3. Analyzer    mean/std, revenue groups, correlation, distribution
//!   4. Renderer    four PNG charts (save, then display)
//!   5. Reporter    three-line conclusion
//!
//! RULES:
//!   - Any stage error aborts the remaining stages. No retries.
//!   - All randomness flows through the RngBank.
//!   - Diagnostics go to the caller's writer in the order above.

use crate::{
    analyzer::{self, Analysis},
    cleaner::{self, MissingReport},
    config::AnalysisConfig,
    dataset::{CleanTable, RawTable},
    error::AnalysisResult,
    generator::TransactionGenerator,
    render::{self, ChartDisplay, Renderer},
    report,
    rng::{RngBank, StageSlot},
};
use std::io::Write;
use std::path::PathBuf;

/// Output of stages 1-3.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub missing: MissingReport,
    pub table: CleanTable,
    pub analysis: Analysis,
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub prepared: Prepared,
    pub charts: Vec<PathBuf>,
    pub conclusions: [String; 3],
}

pub struct SalesPipeline<'a> {
    pub config: AnalysisConfig,
    pub rng_bank: RngBank,
    output_dir: PathBuf,
    display: &'a dyn ChartDisplay,
}

impl<'a> SalesPipeline<'a> {
    pub fn new(config: AnalysisConfig, output_dir: impl Into<PathBuf>, display: &'a dyn ChartDisplay) -> Self {
        Self {
            rng_bank: RngBank::new(config.seed),
            config,
            output_dir: output_dir.into(),
            display,
        }
    }

    /// Stage 1. Each call restarts the generator stream, so repeated
    /// calls return identical tables.
    pub fn generate(&self) -> AnalysisResult<RawTable> {
        let mut rng = self.rng_bank.for_stage(StageSlot::Generator);
        TransactionGenerator::new(&self.config).generate(&mut rng)
    }

    /// Stages 1-3, writing the cleaner and analyzer diagnostics.
    pub fn prepare(&self, out: &mut impl Write) -> AnalysisResult<Prepared> {
        let raw = self.generate()?;
        log::info!("generated {} transactions (seed={})", raw.len(), self.rng_bank.master_seed());

        let missing = cleaner::missing_values(&raw);
        writeln!(out, "{}", report::missing_values(&missing))?;
        if missing.total() > 0 {
            log::warn!("{} missing values in generated data", missing.total());
        }

        let table = cleaner::normalize_dates(raw)?;
        writeln!(out, "{}", report::column_types(&cleaner::column_types(&table)))?;

        let analysis = analyzer::analyze(&table, self.config.histogram_bins)?;
        writeln!(out, "{}", report::summary_stats(&analysis))?;
        writeln!(
            out,
            "{}",
            report::revenue_table("Revenue by category", &analysis.revenue_by_category)
        )?;
        writeln!(out, "{}", report::revenue_table("Revenue by city", &analysis.revenue_by_city))?;
        writeln!(out, "{}", report::correlation_matrix(&analysis.correlation))?;
        log::info!("analysis complete");

        Ok(Prepared {
            missing,
            table,
            analysis,
        })
    }

    /// The full run: stages 1-5.
    pub fn run(&self, out: &mut impl Write) -> AnalysisResult<RunOutput> {
        let prepared = self.prepare(out)?;

        let renderer = Renderer::new(&self.output_dir, self.display);
        let charts = renderer.render_all(&render::standard_charts(&prepared.analysis, &self.config))?;

        let conclusions = report::conclusions(&prepared.analysis, &self.config.currency);
        writeln!(out, "Key findings:")?;
        for line in &conclusions {
            writeln!(out, "{line}")?;
        }

        Ok(RunOutput {
            prepared,
            charts,
            conclusions,
        })
    }
}
