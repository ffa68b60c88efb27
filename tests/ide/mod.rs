//! IDE layer tests
//!
//! Tests for:
//! - Host lifecycle (load, reload, unload, reindex)
//! - Key and value completion
//! - Documentation rendering

pub mod tests_completion;
pub mod tests_host;
