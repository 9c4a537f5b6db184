mod create;
mod delete;
mod get;
mod list;
mod search;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntryCommands;
use crate::context::AppContext;

/// Handle `oak entry`.
pub async fn handle(
    action: &EntryCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EntryCommands::Create(args) => create::run(args, ctx, flags).await,
        EntryCommands::Get { name, with_sources } => {
            get::run(name, *with_sources, ctx, flags).await
        }
        EntryCommands::Update(args) => update::run(args, ctx, flags).await,
        EntryCommands::Delete { name } => delete::run(name, ctx, flags).await,
        EntryCommands::List(args) => list::run(args, ctx, flags).await,
        EntryCommands::Search { pattern } => search::run(pattern, ctx, flags).await,
    }
}
