//! Web platform implementations.

mod storage;

pub use storage::WebStorage;
