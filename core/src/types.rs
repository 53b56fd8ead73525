//! Shared primitive types used across the whole pipeline.

/// The master seed for a run. Every random draw derives from it.
pub type Seed = u64;

/// A stable, unique identifier for a synthetic account (`ACC-0001`).
pub type AccountId = String;

/// A monetary amount in the run's currency.
pub type Amount = f64;
