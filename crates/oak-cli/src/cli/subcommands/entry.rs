use clap::{Args, Subcommand};

/// Entry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EntryCommands {
    /// Create an entry.
    Create(EntryCreateArgs),
    /// Get an entry by scientific name.
    Get {
        name: String,
        /// Include every source record for the entry.
        #[arg(long)]
        with_sources: bool,
    },
    /// Update fields of an entry. An empty string clears a field.
    Update(EntryUpdateArgs),
    /// Delete an entry and its source records.
    Delete { name: String },
    /// List entries, optionally filtered by placement.
    List(EntryListArgs),
    /// Find names containing a literal substring.
    Search { pattern: String },
}

#[derive(Clone, Debug, Args)]
pub struct EntryCreateArgs {
    pub name: String,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub hybrid: bool,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub subgenus: Option<String>,
    #[arg(long)]
    pub section: Option<String>,
    #[arg(long)]
    pub subsection: Option<String>,
    #[arg(long)]
    pub complex: Option<String>,
    #[arg(long)]
    pub parent1: Option<String>,
    #[arg(long)]
    pub parent2: Option<String>,
    #[arg(long)]
    pub synonym: Vec<String>,
    #[arg(long)]
    pub related: Vec<String>,
    #[arg(long)]
    pub variety: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct EntryUpdateArgs {
    pub name: String,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub hybrid: Option<bool>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub subgenus: Option<String>,
    #[arg(long)]
    pub section: Option<String>,
    #[arg(long)]
    pub subsection: Option<String>,
    #[arg(long)]
    pub complex: Option<String>,
    #[arg(long)]
    pub parent1: Option<String>,
    #[arg(long)]
    pub parent2: Option<String>,
    /// Replaces the synonym list.
    #[arg(long)]
    pub synonym: Option<Vec<String>>,
    #[arg(long)]
    pub related: Option<Vec<String>>,
    #[arg(long)]
    pub variety: Option<Vec<String>>,
}

#[derive(Clone, Debug, Args)]
pub struct EntryListArgs {
    #[arg(long)]
    pub subgenus: Option<String>,
    #[arg(long)]
    pub section: Option<String>,
    #[arg(long)]
    pub subsection: Option<String>,
    #[arg(long)]
    pub complex: Option<String>,
    #[arg(long)]
    pub hybrid: Option<bool>,
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}
