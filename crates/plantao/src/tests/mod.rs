//! Integration tests for the application layer
//!
//! Tests are organized by topic:
//! - `fixtures` - Shared drafts and planner setup
//! - `planner` - Mutations, read-after-write and recomputed views
//! - `documents` - Fail-soft reading of stored documents
//! - `import` - YAML batch import
//! - `config` - Configuration file handling
//! - `native_storage` - JSON directory backend (native only)

mod documents;
