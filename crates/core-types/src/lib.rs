//! # Tally Core Types
//!
//! The shared vocabulary of the workspace: charts, data points, the request
//! payloads that create or modify them, and the validation rules every
//! payload must pass before it reaches the store.
//!
//! This crate is Layer 0. It has no knowledge of storage, HTTP or analytics.

pub mod enums;
pub mod error;
pub mod structs;
pub mod validation;

// Re-export the core types to provide a clean public API.
pub use enums::ChartCategory;
pub use error::CoreError;
pub use structs::{
    Chart, ChartUpdate, DataPoint, DataPointUpdate, NewChart, NewDataPoint, Observation,
};
