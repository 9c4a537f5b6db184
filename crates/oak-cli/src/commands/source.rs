use anyhow::Context;
use oak_core::entities::Source;
use oak_db::updates::source::{SourceUpdate, SourceUpdateBuilder};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{SourceAddArgs, SourceCommands, SourceUpdateArgs};
use crate::commands::shared::parse::nullable;
use crate::context::AppContext;
use crate::output::output;

/// Handle `oak source`.
pub async fn handle(
    action: &SourceCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SourceCommands::Add(args) => {
            let source = ctx.service.create_source(source_from_args(args)).await?;
            output(&source, flags.format)
        }
        SourceCommands::List => {
            let sources = ctx.service.list_sources().await?;
            output(&sources, flags.format)
        }
        SourceCommands::Get { id } => {
            let source = ctx.service.get_source(*id).await?;
            output(&source, flags.format)
        }
        SourceCommands::Update(args) => {
            let update = update_from_args(args)?;
            let source = ctx.service.update_source(args.id, update).await?;
            output(&source, flags.format)
        }
        SourceCommands::Delete { id } => {
            ctx.service.delete_source(*id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}

fn source_from_args(args: &SourceAddArgs) -> Source {
    Source {
        source_type: args.source_type.clone(),
        name: args.name.clone(),
        description: args.description.clone(),
        author: args.author.clone(),
        year: args.year,
        url: args.url.clone(),
        isbn: args.isbn.clone(),
        doi: args.doi.clone(),
        notes: args.notes.clone(),
        license: args.license.clone(),
        license_url: args.license_url.clone(),
        ..Source::default()
    }
}

fn update_from_args(args: &SourceUpdateArgs) -> anyhow::Result<SourceUpdate> {
    let mut builder = SourceUpdateBuilder::new();
    if let Some(source_type) = &args.source_type {
        builder = builder.source_type(source_type.trim());
    }
    if let Some(name) = &args.name {
        builder = builder.name(name.trim());
    }
    if let Some(description) = nullable(args.description.as_deref()) {
        builder = builder.description(description);
    }
    if let Some(author) = nullable(args.author.as_deref()) {
        builder = builder.author(author);
    }
    if let Some(year) = nullable(args.year.as_deref()) {
        let year = year
            .map(|raw| raw.parse::<i32>())
            .transpose()
            .context("--year must be a whole number")?;
        builder = builder.year(year);
    }
    if let Some(url) = nullable(args.url.as_deref()) {
        builder = builder.url(url);
    }
    if let Some(license) = nullable(args.license.as_deref()) {
        builder = builder.license(license);
    }
    if let Some(notes) = nullable(args.notes.as_deref()) {
        builder = builder.notes(notes);
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::update_from_args;
    use crate::cli::subcommands::SourceCommands;
    use crate::cli::{Cli, Commands};

    fn parse_update(argv: &[&str]) -> anyhow::Result<oak_db::updates::source::SourceUpdate> {
        let mut full = vec!["oak", "source", "update", "3"];
        full.extend_from_slice(argv);
        let cli = Cli::try_parse_from(full).expect("cli should parse");
        let Commands::Source {
            action: SourceCommands::Update(args),
        } = cli.command
        else {
            panic!("expected source update");
        };
        update_from_args(&args)
    }

    #[test]
    fn empty_year_clears_it() {
        let update = parse_update(&["--year", ""]).expect("update should build");
        assert_eq!(update.year, Some(None));
    }

    #[test]
    fn non_numeric_year_is_rejected() {
        assert!(parse_update(&["--year", "nineteen"]).is_err());
    }
}
