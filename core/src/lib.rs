//! Synthetic retail sales analysis.
//!
//! A single forward pipeline: generate a seeded transaction table,
//! clean it, aggregate it, render four charts and summarize the result.
//! See `pipeline` for the fixed stage order.

pub mod analyzer;
pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod rng;
pub mod stats;
pub mod types;
