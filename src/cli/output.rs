//! Output rendering for command results
//!
//! Every command that returns a resource body goes through [`render`], which
//! writes one of the supported formats:
//!
//! - `json`: pretty-printed with 4-space indentation, the full record
//! - `yaml`: the full record
//! - `table`: a bordered table of flat columns (nothing for zero rows)
//! - `tsv`: a header line plus one tab-separated line per row
//! - `none`: no output at all
//!
//! Table and TSV columns start with `ID`, followed by every other attribute
//! in declaration order except relation attributes. Columns are taken from
//! the first record, so slices must be homogeneous.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tabled::{builder::Builder, settings::Style};
use thiserror::Error;

use crate::core::resource::Tabular;

/// Output format for resource bodies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    /// Bordered table (the default)
    #[default]
    Table,
    /// Tab-separated values (for piping)
    Tsv,
    /// No output
    None,
}

impl OutputFormat {
    pub const NAMES: &'static [&'static str] = &["json", "yaml", "table", "tsv", "none"];
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::None => write!(f, "none"),
        }
    }
}

/// An output format name that is not one of [`OutputFormat::NAMES`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported output format: {0} (expected one of json, yaml, table, tsv, none)")]
pub struct UnsupportedFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "table" => Ok(OutputFormat::Table),
            "tsv" => Ok(OutputFormat::Tsv),
            "none" => Ok(OutputFormat::None),
            _ => Err(UnsupportedFormat(s.to_string())),
        }
    }
}

/// Errors raised while rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Format(#[from] UnsupportedFormat),

    #[error("could not encode JSON output")]
    Json(#[from] serde_json::Error),

    #[error("could not encode YAML output")]
    Yaml(#[from] serde_yml::Error),

    #[error("could not write TSV output")]
    Tsv(#[from] csv::Error),

    #[error("cannot build table rows from a non-record value")]
    NotARecord,

    #[error("could not write output")]
    Io(#[from] std::io::Error),
}

/// What a command hands to the renderer
#[derive(Debug)]
pub enum Payload<'a, T> {
    One(&'a T),
    Many(&'a [T]),
}

impl<T: Serialize> Serialize for Payload<'_, T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payload::One(item) => item.serialize(serializer),
            Payload::Many(items) => items.serialize(serializer),
        }
    }
}

/// Flat rows extracted from a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rows {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Render a payload in the given format
pub fn render<T: Tabular>(
    out: &mut dyn Write,
    payload: Payload<'_, T>,
    format: OutputFormat,
) -> Result<(), RenderError> {
    match format {
        OutputFormat::Json => {
            let mut buf: Vec<u8> = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            payload.serialize(&mut serializer)?;
            out.write_all(&buf)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&payload)?;
            out.write_all(yaml.as_bytes())?;
        }
        OutputFormat::Table => {
            let rows = extract_rows(payload)?;
            if rows.rows.is_empty() {
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(rows.headers);
            for row in rows.rows {
                builder.push_record(row);
            }
            writeln!(out, "{}", builder.build().with(Style::ascii()))?;
        }
        OutputFormat::Tsv => {
            let rows = extract_rows(payload)?;
            let mut writer = csv::WriterBuilder::new()
                .delimiter(b'\t')
                .quote_style(csv::QuoteStyle::Never)
                .flexible(true)
                .from_writer(&mut *out);
            writer.write_record(&rows.headers)?;
            for row in &rows.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::None => {}
    }
    Ok(())
}

/// Flatten a payload into headers and string cells
pub fn extract_rows<T: Tabular>(payload: Payload<'_, T>) -> Result<Rows, RenderError> {
    let records = match payload {
        Payload::One(item) => vec![record(item)?],
        Payload::Many(items) => items.iter().map(record).collect::<Result<Vec<_>, _>>()?,
    };

    let columns: Vec<String> = records
        .first()
        .map(|first| {
            first
                .keys()
                .filter(|key| key.as_str() != "id" && !T::RELATIONS.contains(&key.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    let mut headers = vec!["ID".to_string()];
    headers.extend(columns.iter().map(|c| c.to_uppercase()));

    let rows = records
        .iter()
        .map(|record| {
            std::iter::once("id")
                .chain(columns.iter().map(String::as_str))
                .map(|key| record.get(key).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(Rows { headers, rows })
}

fn record<T: Serialize>(item: &T) -> Result<serde_json::Map<String, Value>, RenderError> {
    match serde_json::to_value(item)? {
        Value::Object(map) => Ok(map),
        _ => Err(RenderError::NotARecord),
    }
}

/// Format one attribute value as a table cell
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
