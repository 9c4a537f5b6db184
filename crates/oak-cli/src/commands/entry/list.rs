use oak_core::entities::EntryFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntryListArgs;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &EntryListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = EntryFilter {
        subgenus: args.subgenus.clone(),
        section: args.section.clone(),
        subsection: args.subsection.clone(),
        complex: args.complex.clone(),
        is_hybrid: args.hybrid,
    };
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    let page = ctx
        .service
        .list_entries(&filter, Some(limit), args.offset)
        .await?;

    if flags.format == crate::cli::OutputFormat::Table {
        output(&page.items, flags.format)
    } else {
        output(&page, flags.format)
    }
}
