//! Entity structs for all oak domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` so that bulk files and CLI
//! output share one shape and incoming records can be schema-validated.

mod audit;
mod entry;
mod source;
mod source_record;
mod taxon;

pub use audit::AuditEntry;
pub use entry::{Entry, EntryFilter, ExternalLink};
pub use source::Source;
pub use source_record::SourceRecord;
pub use taxon::Taxon;
