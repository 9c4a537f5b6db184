use anyhow::Context;
use tracing::info;

use crate::cli::root_commands::ExportArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{output, render};

/// Handle `oak export`.
///
/// The dump is always JSON: compact with `--format raw`, pretty otherwise.
/// Writing to a file prints the export metadata instead.
pub async fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let file = ctx.service.export().await?;
    let json_format = if flags.format == OutputFormat::Raw {
        OutputFormat::Raw
    } else {
        OutputFormat::Json
    };

    let Some(path) = args.target() else {
        return output(&file, json_format);
    };

    let rendered = render(&file, json_format)?;
    std::fs::write(path, rendered + "\n")
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), species = file.metadata.species_count, "export written");
    output(&file.metadata, flags.format)
}
