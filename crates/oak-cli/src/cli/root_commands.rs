use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::PolicyArg;
use crate::cli::subcommands::{EntryCommands, RecordCommands, SourceCommands, TaxonCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Species and hybrid entries.
    Entry {
        #[command(subcommand)]
        action: EntryCommands,
    },
    /// Bibliographic and web sources.
    Source {
        #[command(subcommand)]
        action: SourceCommands,
    },
    /// Per-source descriptive data for an entry.
    Record {
        #[command(subcommand)]
        action: RecordCommands,
    },
    /// Subgenus, section, subsection, and complex reference data.
    Taxon {
        #[command(subcommand)]
        action: TaxonCommands,
    },
    /// Merge entries from a JSON or JSONL file.
    Import(ImportArgs),
    /// Query the audit trail.
    Audit(AuditArgs),
    /// Store-wide counts.
    Stats,
    /// Write every entry, source, and source record as one JSON file.
    Export(ExportArgs),
    /// Print the effective configuration as TOML.
    Config,
}

/// Arguments for `oak import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// A JSON array, a single JSON object, or JSON Lines (`.jsonl`).
    pub file: PathBuf,
    /// Conflict policy (defaults to `import.default_policy`).
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

/// Arguments for `oak export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Output file (stdout when omitted).
    #[arg(conflicts_with = "output")]
    pub file: Option<PathBuf>,
    /// Output file, as a flag.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    #[must_use]
    pub fn target(&self) -> Option<&PathBuf> {
        self.file.as_ref().or(self.output.as_ref())
    }
}

/// Arguments for `oak audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
}
