use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use crate::error::Error;
use crate::models::{ExchangeTask, TaggedDocument};

/// Parse an exchange-format export file into tasks
pub fn parse_exchange_file(path: &Path) -> Result<Vec<ExchangeTask>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_exchange_json(&content).with_context(|| format!("Failed to parse export: {:?}", path))
}

/// Parse an exchange-format JSON string into tasks
///
/// Each task is decoded on its own so a shape error names the offending
/// document's position.
pub fn parse_exchange_json(json: &str) -> crate::error::Result<Vec<ExchangeTask>> {
    let items: Vec<Value> = serde_json::from_str(json)?;
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| Error::malformed(index, e.to_string()))
        })
        .collect()
}

/// Read tagger output: an array of `{text, tokens: [{text, offset, tag}]}`
pub fn read_tagged_documents(path: &Path) -> Result<Vec<TaggedDocument>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    serde_json::from_str(&content).context("Failed to parse tagged documents")
}

/// Read a JSON array of record objects
pub fn read_records(path: &Path) -> Result<Vec<Value>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let records: Vec<Value> =
        serde_json::from_str(&content).context("Failed to parse records")?;
    Ok(records)
}

/// Parse an entity list that was stored as a JSON string
///
/// Blank strings and `[]` are empty lists. Anything that is not a JSON array
/// is a ParseFailure.
pub fn parse_entity_list(raw: &str) -> crate::error::Result<Vec<Value>> {
    let cleaned = raw.trim();
    if cleaned.is_empty() || cleaned == "[]" {
        return Ok(vec![]);
    }

    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Array(entries)) => Ok(entries),
        Ok(other) => Err(Error::parse_failure(
            raw,
            format!("expected a list, found {}", json_kind(&other)),
        )),
        Err(e) => Err(Error::parse_failure(raw, e.to_string())),
    }
}

/// Like [`parse_entity_list`], but logs failures and falls back to an empty list
pub fn parse_entity_list_or_empty(raw: &str) -> Vec<Value> {
    parse_entity_list(raw).unwrap_or_else(|e| {
        warn!("{}", e);
        vec![]
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
