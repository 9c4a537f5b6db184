use crate::cli::GlobalFlags;
use crate::commands::shared::parse::entry_name;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    with_sources: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let name = entry_name(name);
    if with_sources {
        let detail = ctx.service.get_entry_with_sources(&name).await?;
        output(&detail, flags.format)
    } else {
        let entry = ctx.service.get_entry(&name).await?;
        output(&entry, flags.format)
    }
}
