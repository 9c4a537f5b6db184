use clap::{Args, Subcommand};

/// Source commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SourceCommands {
    /// Register a source.
    Add(SourceAddArgs),
    /// List all sources.
    List,
    /// Get a source by id.
    Get { id: i64 },
    /// Update fields of a source. An empty string clears a field.
    Update(SourceUpdateArgs),
    /// Delete a source that no record uses.
    Delete { id: i64 },
}

#[derive(Clone, Debug, Args)]
pub struct SourceAddArgs {
    /// Kind of source, e.g. book, website, journal.
    #[arg(long = "type")]
    pub source_type: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub isbn: Option<String>,
    #[arg(long)]
    pub doi: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub license: Option<String>,
    #[arg(long)]
    pub license_url: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SourceUpdateArgs {
    pub id: i64,
    #[arg(long = "type")]
    pub source_type: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    /// Publication year; an empty value clears it.
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub license: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}
