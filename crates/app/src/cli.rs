//! Command-line arguments and their translation into body values.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use wirebody_domain::body::{FORM_URLENCODED, MULTIPART_FORM_DATA};
use wirebody_domain::{MultiPartItem, MultiValuedMap, MultipartMode, ScriptValue};

/// Encode request bodies into HTTP entities.
#[derive(Debug, Parser)]
#[command(name = "wirebody", version, about)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// What to encode.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode `key=value` pairs as a URL-encoded form.
    Form {
        /// Content type written on the entity.
        #[arg(long, default_value = FORM_URLENCODED)]
        media_type: String,

        /// Fields as `key=value`; a bare `key` is a field without value.
        fields: Vec<String>,
    },

    /// Encode parts as a multipart body.
    Multipart {
        /// Base media type; a boundary parameter is added.
        #[arg(long, default_value = MULTIPART_FORM_DATA)]
        media_type: String,

        /// Parts as `name=value`, `name=@file`, `@file` or a bare value.
        /// Parts without a name produce `multipart/related` framing.
        parts: Vec<String>,
    },

    /// Parse a media type and print its structure as JSON.
    ContentType {
        /// The media type, e.g. `text/plain; charset=UTF-8`.
        media_type: String,
    },

    /// Print the encoder settings, saving any values given as options.
    Settings {
        /// `strict` or `browser_compatible`.
        #[arg(long, value_name = "MODE", value_parser = parse_mode)]
        multipart_mode: Option<MultipartMode>,

        /// Number of characters in generated boundaries.
        #[arg(long, value_name = "N")]
        boundary_length: Option<usize>,
    },
}

fn parse_mode(value: &str) -> Result<MultipartMode, String> {
    MultipartMode::from_name(value)
        .ok_or_else(|| format!("unknown multipart mode '{value}'"))
}

/// Collects `key=value` arguments into form fields.
///
/// Repeated keys accumulate values. A bare key adds the field with no value
/// unless it already has values.
#[must_use]
pub fn parse_fields(args: &[String]) -> MultiValuedMap {
    let mut fields = MultiValuedMap::new();
    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) => fields.add(key, value),
            None if !fields.contains_key(arg) => fields.put_null(arg.as_str()),
            None => {}
        }
    }
    fields
}

/// Parses one multipart argument.
///
/// # Errors
///
/// Returns an error if a referenced file cannot be opened.
pub fn parse_part(arg: &str) -> anyhow::Result<MultiPartItem> {
    let (name, value) = match arg.split_once('=') {
        Some((name, value)) if !name.starts_with('@') => (Some(name), value),
        _ => (None, arg),
    };

    let item = match value.strip_prefix('@') {
        Some(path) => file_part(name, Path::new(path))?,
        None => match name {
            Some(name) => MultiPartItem::new(name, value),
            None => MultiPartItem::unnamed(value),
        },
    };
    Ok(item)
}

fn file_part(name: Option<&str>, path: &Path) -> anyhow::Result<MultiPartItem> {
    let file =
        File::open(path).with_context(|| format!("cannot open part file {}", path.display()))?;
    let value = ScriptValue::stream(file);
    let item = match name {
        Some(name) => MultiPartItem::new(name, value),
        None => MultiPartItem::unnamed(value),
    };

    let item = match path.file_name().and_then(|n| n.to_str()) {
        Some(filename) => item.with_filename(filename),
        None => item,
    };
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();
    Ok(item.with_content_type(mime_type.essence_str()))
}
