use oak_core::enums::{AuditAction, EntityType};
use oak_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{entry_name, parse_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `oak audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = AuditFilter {
        entity_type: args
            .entity_type
            .as_deref()
            .map(|value| parse_enum::<EntityType>(value, "entity-type"))
            .transpose()?,
        entity_id: args.entity_id.as_deref().map(entry_name),
        action: args
            .action
            .as_deref()
            .map(|value| parse_enum::<AuditAction>(value, "action"))
            .transpose()?,
        limit: Some(ctx.service.clamp_limit(Some(effective_limit(
            flags.limit,
            ctx.config.general.default_limit,
        )))),
    };

    let entries = ctx.service.query_audit(&filter).await?;
    output(&entries, flags.format)
}
