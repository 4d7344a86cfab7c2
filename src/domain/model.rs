use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One listening event as exported, keys kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

/// Resolved header plus rendered cells, one row per input record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    pub fieldnames: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl NormalizedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[cfg(test)]
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.fieldnames.iter().position(|f| f == name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }
}
