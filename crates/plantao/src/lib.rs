//! Plantão application library
//!
//! Wires the projection engine in `plantao_core` to persistent storage:
//! - Key-value storage backends for native (JSON files) and web (LocalStorage)
//! - Typed, fail-soft access to the stored documents
//! - A planner service that applies user mutations and recomputes views
//! - Configuration, logging, YAML import and plain-text rendering for the CLI

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod config;
pub mod documents;
pub mod import;
pub mod planner;
pub mod platform;
pub mod render;

#[cfg(feature = "native")]
mod logging;

// ============================================================================
// Web entry point
// ============================================================================

#[cfg(feature = "web")]
pub mod web;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::AppConfig;
pub use documents::{DocumentKeys, Documents};
pub use import::{ImportBatch, ImportSummary};
#[cfg(feature = "native")]
pub use logging::init_logging;
pub use planner::{Planner, PlannerError};
pub use platform::{MemoryStorage, Storage, StorageError};

/// Today's date in the system time zone
pub fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}
