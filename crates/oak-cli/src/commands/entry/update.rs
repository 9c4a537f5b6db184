use oak_db::updates::entry::{EntryUpdate, EntryUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntryUpdateArgs;
use crate::commands::shared::parse::{entry_name, nullable, nullable_name};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    args: &EntryUpdateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let update = update_from_args(args);
    if update.is_empty() {
        anyhow::bail!("Nothing to update: pass at least one field flag");
    }

    let entry = ctx
        .service
        .update_entry(&entry_name(&args.name), update, &ctx.validator)
        .await?;
    output(&entry, flags.format)
}

fn update_from_args(args: &EntryUpdateArgs) -> EntryUpdate {
    let mut builder = EntryUpdateBuilder::new();
    if let Some(author) = nullable(args.author.as_deref()) {
        builder = builder.author(author);
    }
    if let Some(hybrid) = args.hybrid {
        builder = builder.is_hybrid(hybrid);
    }
    if let Some(status) = nullable(args.status.as_deref()) {
        builder = builder.conservation_status(status);
    }
    if let Some(subgenus) = nullable(args.subgenus.as_deref()) {
        builder = builder.subgenus(subgenus);
    }
    if let Some(section) = nullable(args.section.as_deref()) {
        builder = builder.section(section);
    }
    if let Some(subsection) = nullable(args.subsection.as_deref()) {
        builder = builder.subsection(subsection);
    }
    if let Some(complex) = nullable(args.complex.as_deref()) {
        builder = builder.complex(complex);
    }
    if let Some(parent1) = nullable_name(args.parent1.as_deref()) {
        builder = builder.parent1(parent1);
    }
    if let Some(parent2) = nullable_name(args.parent2.as_deref()) {
        builder = builder.parent2(parent2);
    }
    if let Some(synonyms) = &args.synonym {
        builder = builder.synonyms(synonyms.clone());
    }
    if let Some(related) = &args.related {
        builder = builder.closely_related_to(related.iter().map(|n| entry_name(n)).collect());
    }
    if let Some(varieties) = &args.variety {
        builder = builder.subspecies_varieties(varieties.clone());
    }
    builder.build()
}
