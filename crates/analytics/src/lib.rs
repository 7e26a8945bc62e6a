//! # Tally Analytics Engine
//!
//! Turns a chart's data points into the numbers a chart view needs: a
//! least-squares trend line, its goodness of fit, and a descriptive
//! statistics summary.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `TrendEngine` holds no state. Every call takes an
//!   observation slice and returns a fresh value, so it can be shared freely across
//!   concurrent requests.
//!
//! ## Public API
//!
//! - `TrendEngine`: The struct that contains the calculation logic.
//! - `TrendResult`, `Statistics`, `ChartReport`: The serializable results.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::TrendEngine;
pub use report::{ChartReport, Statistics, TrendDirection, TrendLinePoint, TrendResult};
