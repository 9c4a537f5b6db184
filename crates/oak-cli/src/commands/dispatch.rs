use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Entry { action } => commands::entry::handle(&action, ctx, flags).await,
        Commands::Source { action } => commands::source::handle(&action, ctx, flags).await,
        Commands::Record { action } => commands::record::handle(&action, ctx, flags).await,
        Commands::Taxon { action } => commands::taxon::handle(&action, ctx, flags).await,
        Commands::Import(args) => commands::import::handle(&args, ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::Stats => commands::stats::handle(ctx, flags).await,
        Commands::Export(args) => commands::export::handle(&args, ctx, flags).await,
        Commands::Config => unreachable!("config is pre-dispatched in main"),
    }
}
