use oak_core::entities::SourceRecord;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{RecordCommands, RecordSetArgs};
use crate::commands::shared::parse::entry_name;
use crate::context::AppContext;
use crate::output::output;

/// Handle `oak record`.
pub async fn handle(
    action: &RecordCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RecordCommands::Set(args) => {
            let record = ctx.service.save_source_record(record_from_args(args)).await?;
            output(&record, flags.format)
        }
        RecordCommands::Get { name, source_id } => {
            let record = ctx
                .service
                .get_source_record(&entry_name(name), *source_id)
                .await?;
            output(&record, flags.format)
        }
        RecordCommands::List { name } => {
            let records = ctx.service.list_source_records(&entry_name(name)).await?;
            output(&records, flags.format)
        }
        RecordCommands::Delete { name, source_id } => {
            let name = entry_name(name);
            ctx.service.delete_source_record(&name, *source_id).await?;
            output(
                &json!({ "deleted": { "scientific_name": name, "source_id": source_id } }),
                flags.format,
            )
        }
    }
}

fn record_from_args(args: &RecordSetArgs) -> SourceRecord {
    SourceRecord {
        scientific_name: entry_name(&args.name),
        source_id: args.source_id,
        local_names: args.local_name.clone(),
        range: args.range.clone(),
        growth_habit: args.growth_habit.clone(),
        leaves: args.leaves.clone(),
        flowers: args.flowers.clone(),
        fruits: args.fruits.clone(),
        bark: args.bark.clone(),
        twigs: args.twigs.clone(),
        buds: args.buds.clone(),
        hardiness_habitat: args.hardiness_habitat.clone(),
        miscellaneous: args.miscellaneous.clone(),
        url: args.url.clone(),
        is_preferred: args.preferred,
        ..SourceRecord::default()
    }
}
