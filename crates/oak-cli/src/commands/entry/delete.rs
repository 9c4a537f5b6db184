use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::entry_name;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(name: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let name = entry_name(name);
    ctx.service.delete_entry(&name).await?;
    output(&json!({ "deleted": name }), flags.format)
}
