//! Repository modules implementing store operations.
//!
//! Each module adds methods to `OakService` via `impl OakService` blocks.
//! Functions taking a `&libsql::Connection` run inside whatever transaction
//! the caller holds, so several of them compose into one atomic write.

pub mod audit;
pub mod entry;
pub mod export;
pub mod source;
pub mod species_source;
pub mod stats;
pub mod taxon;
