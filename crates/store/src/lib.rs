//! # Tally Store Crate
//!
//! The chart repository the rest of the application reads from and writes to.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** Handlers talk to `ChartRepository` only through its
//!   high-level methods; nothing outside this crate touches the underlying maps.
//! - **Tenant Scoping:** Every method takes the owning user's id. A chart that
//!   belongs to someone else is indistinguishable from one that does not exist.
//! - **Shared & Async:** The repository is a cheap `Clone` around an
//!   `Arc<RwLock<..>>`, so one instance serves every request concurrently.
//!
//! Data lives in process memory and is lost on restart.
//!
//! ## Public API
//!
//! - `ChartRepository`: CRUD for charts and their data points.
//! - `StoreLimits`: Per-user quotas enforced on insert.
//! - `StoreError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::StoreError;
pub use repository::{ChartRepository, StoreLimits};
