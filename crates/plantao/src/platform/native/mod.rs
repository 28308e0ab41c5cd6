//! Native platform implementations.

mod storage;

pub use storage::NativeStorage;
