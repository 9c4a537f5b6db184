use clap::{Args, Subcommand};

/// Source record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RecordCommands {
    /// Create or replace the record for an entry and source.
    Set(RecordSetArgs),
    /// Get one record.
    Get { name: String, source_id: i64 },
    /// List the records of an entry, preferred first.
    List { name: String },
    /// Delete one record.
    Delete { name: String, source_id: i64 },
}

#[derive(Clone, Debug, Args)]
pub struct RecordSetArgs {
    pub name: String,
    pub source_id: i64,
    #[arg(long)]
    pub local_name: Vec<String>,
    #[arg(long)]
    pub range: Option<String>,
    #[arg(long)]
    pub growth_habit: Option<String>,
    #[arg(long)]
    pub leaves: Option<String>,
    #[arg(long)]
    pub flowers: Option<String>,
    #[arg(long)]
    pub fruits: Option<String>,
    #[arg(long)]
    pub bark: Option<String>,
    #[arg(long)]
    pub twigs: Option<String>,
    #[arg(long)]
    pub buds: Option<String>,
    #[arg(long)]
    pub hardiness_habitat: Option<String>,
    #[arg(long)]
    pub miscellaneous: Option<String>,
    #[arg(long)]
    pub url: Option<String>,
    /// Mark as the preferred record for this entry.
    #[arg(long)]
    pub preferred: bool,
}
