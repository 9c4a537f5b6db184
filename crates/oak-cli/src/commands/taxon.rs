use oak_core::entities::Taxon;
use oak_core::enums::TaxonLevel;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaxonCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `oak taxon`.
pub async fn handle(
    action: &TaxonCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaxonCommands::Add {
            name,
            level,
            parent,
            author,
            notes,
        } => {
            let taxon = ctx
                .service
                .save_taxon(Taxon {
                    name: name.trim().to_string(),
                    level: parse_enum::<TaxonLevel>(level, "level")?,
                    parent: parent.clone(),
                    author: author.clone(),
                    notes: notes.clone(),
                })
                .await?;
            output(&taxon, flags.format)
        }
        TaxonCommands::List { level } => {
            let level = level
                .as_deref()
                .map(|value| parse_enum::<TaxonLevel>(value, "level"))
                .transpose()?;
            let taxa = ctx.service.list_taxa(level).await?;
            output(&taxa, flags.format)
        }
    }
}
