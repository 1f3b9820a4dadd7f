//! Wirebody - Main Entry Point
//!
//! Encodes form fields and multipart parts into HTTP entities and writes
//! them to stdout as a `Content-Type` line, a blank line and the raw body.

mod cli;
mod logger;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use wirebody_domain::EncoderSettings;
use wirebody_infrastructure::{
    Entity, SettingsRepository, create_content_type, form_entity, multipart_entity_with,
    to_json_stable,
};

use crate::cli::{Cli, Command, parse_fields, parse_part};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Form { media_type, fields } => {
            let fields = parse_fields(&fields);
            write_entity(&form_entity(&fields, &media_type))
        }

        Command::Multipart { media_type, parts } => {
            let settings = load_settings(cli.settings).await?;
            let items = parts
                .iter()
                .map(String::as_str)
                .map(parse_part)
                .collect::<anyhow::Result<Vec<_>>>()?;
            let entity = multipart_entity_with(items, &media_type, &settings)?;
            write_entity(&entity)
        }

        Command::ContentType { media_type } => {
            let content_type = create_content_type(&media_type)?;
            let parameters: serde_json::Map<String, serde_json::Value> = content_type
                .parameters()
                .map(|(name, value)| (name.to_string(), value.into()))
                .collect();
            let json = serde_json::json!({
                "mime_type": content_type.mime_type(),
                "charset": content_type.charset(),
                "parameters": parameters,
                "value": content_type.to_string(),
            });
            print!("{}", to_json_stable(&json)?);
            Ok(())
        }

        Command::Settings {
            multipart_mode,
            boundary_length,
        } => {
            if multipart_mode.is_none() && boundary_length.is_none() {
                let settings = load_settings(cli.settings).await?;
                print!("{}", to_json_stable(&settings)?);
                return Ok(());
            }

            let repo = repository(cli.settings);
            let mut settings = repo
                .load_file()
                .await
                .context("failed to read encoder settings")?;
            if let Some(mode) = multipart_mode {
                settings.multipart_mode = mode;
            }
            if let Some(length) = boundary_length {
                settings.boundary_length = length;
            }
            repo.save(&settings)
                .await
                .context("failed to save encoder settings")?;
            tracing::info!(path = ?repo.path(), "encoder settings saved");
            print!("{}", to_json_stable(&settings)?);
            Ok(())
        }
    }
}

fn repository(path: Option<PathBuf>) -> SettingsRepository {
    path.map_or_else(SettingsRepository::new, SettingsRepository::with_path)
}

async fn load_settings(path: Option<PathBuf>) -> anyhow::Result<EncoderSettings> {
    let repo = repository(path);
    let settings = repo.load().await.context("failed to load encoder settings")?;
    tracing::debug!(?settings, "using encoder settings");
    Ok(settings)
}

fn write_entity(entity: &Entity) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    if let Some(content_type) = entity.content_type() {
        writeln!(stdout, "Content-Type: {content_type}")?;
    }
    writeln!(stdout)?;
    stdout.write_all(entity.content())?;
    stdout.flush()?;
    tracing::info!(bytes = entity.len(), "entity written");
    Ok(())
}
