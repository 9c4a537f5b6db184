mod entry;
mod record;
mod source;
mod taxon;

pub use entry::{EntryCommands, EntryCreateArgs, EntryListArgs, EntryUpdateArgs};
pub use record::{RecordCommands, RecordSetArgs};
pub use source::{SourceAddArgs, SourceCommands, SourceUpdateArgs};
pub use taxon::TaxonCommands;
