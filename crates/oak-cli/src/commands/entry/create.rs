use oak_core::entities::Entry;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntryCreateArgs;
use crate::commands::shared::parse::entry_name;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    args: &EntryCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entry = ctx
        .service
        .create_entry(entry_from_args(args), &ctx.validator)
        .await?;
    output(&entry, flags.format)
}

fn entry_from_args(args: &EntryCreateArgs) -> Entry {
    Entry {
        author: args.author.clone(),
        is_hybrid: args.hybrid,
        conservation_status: args.status.clone(),
        subgenus: args.subgenus.clone(),
        section: args.section.clone(),
        subsection: args.subsection.clone(),
        complex: args.complex.clone(),
        parent1: args.parent1.as_deref().map(entry_name),
        parent2: args.parent2.as_deref().map(entry_name),
        closely_related_to: args.related.iter().map(|n| entry_name(n)).collect(),
        subspecies_varieties: args.variety.clone(),
        synonyms: args.synonym.clone(),
        ..Entry::new(entry_name(&args.name))
    }
}
