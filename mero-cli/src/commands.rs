//! Subcommand implementations.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::debug;
use log::info;
use log::warn;
use mero_lib::derive;
use mero_lib::model::FieldDescriptor;
use mero_lib::model::Record;
use mero_lib::query::Direction;
use mero_lib::query::QueryState;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;

use crate::args::Command;
use crate::args::FieldsArgs;
use crate::args::ViewArgs;
use crate::error::CliError;
use crate::render;
use crate::settings::Settings;

/// Contents of a `--query` file, also what `mero fields` prints.
///
/// Without `fields`, descriptors are inferred from the records. `query` is
/// a partial [`QueryState`]: keys it leaves out take the settings defaults.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Map<String, serde_json::Value>>,
}

pub fn run<W: Write>(command: &Command, settings: &Settings, out: &mut W) -> Result<(), CliError> {
    match command {
        Command::View(args) => view(args, settings, out),
        Command::Fields(args) => fields(args, out),
    }
}

fn view<W: Write>(args: &ViewArgs, settings: &Settings, out: &mut W) -> Result<(), CliError> {
    let records: Vec<Record> = read_json(&args.records)?;
    info!("loaded {} records from {}", records.len(), args.records.display());

    let mut query = settings_query(settings);
    let mut fields = None;
    if let Some(path) = &args.query {
        let file: QueryFile = read_json(path)?;
        if let Some(saved) = file.query {
            query = layer_query(query, saved).map_err(|e| CliError::parse(path, e))?;
        }
        fields = file.fields;
    }

    let fields = fields.unwrap_or_else(|| infer_fields(&records));
    let query = apply_flags(query, args);
    query.validate()?;
    for ignored in query.ignored_operations(&fields) {
        warn!("{}", ignored);
        eprintln!("warning: {}", ignored);
    }
    debug!("query: {:?}", query);

    let view = derive(&records, &fields, &query);
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)?;
    } else {
        render::write_view(out, &view, &fields)?;
    }
    Ok(())
}

fn fields<W: Write>(args: &FieldsArgs, out: &mut W) -> Result<(), CliError> {
    let records: Vec<Record> = read_json(&args.records)?;
    let file = QueryFile {
        fields: Some(infer_fields(&records)),
        query: None,
    };
    serde_json::to_writer_pretty(&mut *out, &file)?;
    writeln!(out)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
    serde_json::from_str(&text).map_err(|e| CliError::parse(path, e))
}

/// One descriptor per key seen in `records`, first-seen order, every
/// operation allowed.
fn infer_fields(records: &[Record]) -> Vec<FieldDescriptor> {
    let mut fields: Vec<FieldDescriptor> = Vec::new();
    for key in records.iter().flat_map(Record::keys) {
        if !fields.iter().any(|f| f.key == key) {
            fields.push(FieldDescriptor::all(key));
        }
    }
    fields
}

/// An empty query carrying the settings defaults.
fn settings_query(settings: &Settings) -> QueryState {
    let mut query = QueryState::new().with_page_size(settings.page_size);
    query.date_format = settings.date_format.clone();
    query
}

/// Overlay the keys of a saved query on `base`.
fn layer_query(
    base: QueryState,
    saved: Map<String, serde_json::Value>,
) -> Result<QueryState, serde_json::Error> {
    let mut merged = match serde_json::to_value(base)? {
        serde_json::Value::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(saved);
    serde_json::from_value(serde_json::Value::Object(merged))
}

/// Command-line flags override the base query.
fn apply_flags(mut query: QueryState, args: &ViewArgs) -> QueryState {
    if let Some(search) = &args.search {
        query.set_search(search.as_str());
    }
    for (field, value) in &args.filters {
        query.set_filter(field.as_str(), value.as_str());
    }
    if let Some(key) = &args.sort {
        query.sort_key = Some(key.clone());
    }
    if args.desc {
        query.sort_direction = Direction::Desc;
    }
    if let Some(key) = &args.group {
        query = if args.by_date {
            query.grouped_by_date(key.as_str())
        } else {
            query.grouped_by(key.as_str())
        };
    }
    if let Some(format) = &args.date_format {
        query.date_format = Some(format.clone());
    }
    if let Some(size) = args.page_size {
        query.page_size = size;
    }
    if let Some(page) = args.page {
        query.page = page;
    }
    query
}
