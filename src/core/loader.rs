use crate::domain::model::Record;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use serde_json::Value;
use std::path::Path;

/// Reads one export file into records.
///
/// The whole file is tried as a single JSON document first (an array of
/// objects or one object). If that fails to parse, every non-blank line is
/// parsed on its own; bad lines are skipped with a warning.
pub fn read_json_file<S: Storage>(storage: &S, path: &Path) -> Result<Vec<Record>> {
    let bytes = storage.read_file(path)?;
    let text = String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
        message: format!("{} is not valid UTF-8: {}", path.display(), e),
    })?;
    Ok(parse_records(&text, path))
}

pub fn parse_records(text: &str, origin: &Path) -> Vec<Record> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => collect_objects(items, origin),
        Ok(Value::Object(obj)) => vec![Record::from(obj)],
        Ok(other) => {
            tracing::warn!(
                "Top-level JSON {} in {} holds no records, skipping",
                value_kind(&other),
                origin.display()
            );
            Vec::new()
        }
        Err(e) => {
            tracing::debug!(
                "{} is not a single JSON document ({}), reading as JSON lines",
                origin.display(),
                e
            );
            parse_json_lines(text, origin)
        }
    }
}

/// 行分隔：`\n`、單獨的 `\r`、`\r\n` 以及其他 Unicode 換行字元
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    const BREAKS: [char; 10] = [
        '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
        '\u{2029}',
    ];

    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(BREAKS) {
            Some(pos) => {
                let line = &rest[..pos];
                let after = &rest[pos..];
                let width = if after.starts_with("\r\n") {
                    2
                } else {
                    after.chars().next().map_or(1, char::len_utf8)
                };
                rest = &after[width..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

fn parse_json_lines(text: &str, origin: &Path) -> Vec<Record> {
    let mut records = Vec::new();

    for (idx, line) in split_lines(text).enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(obj)) => records.push(Record::from(obj)),
            Ok(other) => tracing::warn!(
                "Skipping JSON {} on line {} in {}",
                value_kind(&other),
                idx + 1,
                origin.display()
            ),
            Err(e) => tracing::warn!(
                "Skipping invalid JSON line {} in {}: {}",
                idx + 1,
                origin.display(),
                e
            ),
        }
    }

    records
}

fn collect_objects(items: Vec<Value>, origin: &Path) -> Vec<Record> {
    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(obj) => records.push(Record::from(obj)),
            other => tracing::warn!(
                "Skipping JSON {} at index {} in {}",
                value_kind(&other),
                idx,
                origin.display()
            ),
        }
    }
    records
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
