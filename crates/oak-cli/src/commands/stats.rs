use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `oak stats`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = ctx.service.stats().await?;
    output(&stats, flags.format)
}
