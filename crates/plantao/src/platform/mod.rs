//! Platform abstraction layer for native/web compatibility.
//!
//! [`Storage`] is the key-value seam every document goes through. Each
//! platform supplies a backend:
//! - [`MemoryStorage`]: in-process map, used by tests and dry runs
//! - `NativeStorage`: one JSON file per key in the data directory
//! - `WebStorage`: browser LocalStorage

mod memory;
mod storage;

#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "web")]
pub mod web;

pub use memory::MemoryStorage;
pub use storage::{Storage, StorageError};

// Re-export platform-specific implementations
#[cfg(feature = "native")]
pub use native::NativeStorage;

#[cfg(feature = "web")]
pub use web::WebStorage;
