//! Column resolution and cell rendering for the combined export.
//!
//! Columns come out in first-seen key order across all records. Known
//! misnamed export fields are folded into their correct name, and the
//! boolean flag columns are always present and always `True`/`False`.

use crate::domain::model::{NormalizedTable, Record};
use serde_json::Value;
use std::collections::HashSet;

/// Fields some exports carry under a wrong name, mapped to the right one.
pub const DEFAULT_RENAMES: [(&str, &str); 1] = [(
    "master_metadata_album_album_name",
    "master_metadata_album_name",
)];

pub const BOOLEAN_FIELDS: [&str; 4] = ["skipped", "shuffled", "incognito_mode", "offline"];

pub fn default_renames() -> Vec<(String, String)> {
    DEFAULT_RENAMES
        .iter()
        .map(|(bad, good)| (bad.to_string(), good.to_string()))
        .collect()
}

/// First-seen key order, scanning records in order and keys in insertion order.
pub fn ordered_fieldnames(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut fieldnames = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.as_str()) {
                fieldnames.push(key.clone());
            }
        }
    }
    fieldnames
}

pub fn resolve_fieldnames(records: &[Record], renames: &[(String, String)]) -> Vec<String> {
    let mut fieldnames = ordered_fieldnames(records);

    for (bad, good) in renames {
        if let Some(bad_idx) = fieldnames.iter().position(|f| f == bad) {
            if fieldnames.iter().any(|f| f == good) {
                // 兩個名字都出現過：保留較早的位置
                let good_idx = fieldnames.iter().position(|f| f == good).unwrap_or(bad_idx);
                if bad_idx < good_idx {
                    fieldnames[bad_idx] = good.clone();
                    fieldnames.remove(good_idx);
                } else {
                    fieldnames.remove(bad_idx);
                }
            } else {
                fieldnames[bad_idx] = good.clone();
            }
        }
        if !fieldnames.iter().any(|f| f == good) {
            fieldnames.push(good.clone());
        }
    }

    for field in BOOLEAN_FIELDS {
        if !fieldnames.iter().any(|f| f == field) {
            fieldnames.push(field.to_string());
        }
    }

    fieldnames
}

pub fn normalize(records: &[Record], renames: &[(String, String)]) -> NormalizedTable {
    let fieldnames = resolve_fieldnames(records, renames);
    let rows = records
        .iter()
        .map(|record| {
            fieldnames
                .iter()
                .map(|column| cell_value(record, column, renames))
                .collect()
        })
        .collect();

    NormalizedTable { fieldnames, rows }
}

/// Renders one cell. Renamed columns read the misnamed key first when the
/// record carries it.
pub fn cell_value(record: &Record, column: &str, renames: &[(String, String)]) -> String {
    let source_key = renames
        .iter()
        .find(|(bad, good)| good == column && record.contains_key(bad))
        .map(|(bad, _)| bad.as_str())
        .unwrap_or(column);
    let value = record.get(source_key);

    if BOOLEAN_FIELDS.contains(&column) {
        boolean_text(value).to_string()
    } else {
        scalar_text(value)
    }
}

pub fn boolean_text(value: Option<&Value>) -> &'static str {
    let is_true = match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.to_lowercase() == "true",
        // 其他型別比對字串形式，數字永遠不會等於 "true"
        Some(other) => scalar_text(Some(other)).to_lowercase() == "true",
    };
    if is_true {
        "True"
    } else {
        "False"
    }
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        // serde_json 的輸出本身就是緊湊格式，且不轉義非 ASCII 字元
        Some(nested @ (Value::Array(_) | Value::Object(_))) => nested.to_string(),
    }
}
