use clap::Subcommand;

/// Taxon reference commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaxonCommands {
    /// Add or update a taxon.
    Add {
        name: String,
        /// subgenus, section, subsection, or complex
        #[arg(long)]
        level: String,
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List taxa, optionally at one level.
    List {
        #[arg(long)]
        level: Option<String>,
    },
}
