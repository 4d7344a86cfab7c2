//! Header check for the combined CSV.
//!
//! Compares the header row against the columns a full streaming-history export
//! is expected to carry. Order is ignored; only membership counts.

use crate::utils::error::Result;
use std::fmt;
use std::path::Path;

pub const EXPECTED_COLUMNS: [&str; 24] = [
    "ts",
    "platform",
    "ms_played",
    "conn_country",
    "ip_addr",
    "master_metadata_track_name",
    "master_metadata_album_artist_name",
    "master_metadata_album_name",
    "spotify_track_uri",
    "episode_name",
    "episode_show_name",
    "spotify_episode_uri",
    "audiobook_title",
    "audiobook_uri",
    "audiobook_chapter_uri",
    "audiobook_chapter_title",
    "reason_start",
    "reason_end",
    "shuffle",
    "skipped",
    "offline",
    "offline_timestamp",
    "incognito_mode",
    "shuffled",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderReport {
    pub headers: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

impl HeaderReport {
    pub fn compare(headers: Vec<String>, expected: &[&str]) -> Self {
        let missing = expected
            .iter()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect();
        let extra = headers
            .iter()
            .filter(|h| !expected.contains(&h.as_str()))
            .cloned()
            .collect();

        Self {
            headers,
            missing,
            extra,
        }
    }
}

impl fmt::Display for HeaderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Headers found ({}): {}",
            self.headers.len(),
            quoted_list(&self.headers)
        )?;
        writeln!(
            f,
            "Missing ({}): {}",
            self.missing.len(),
            quoted_list(&self.missing)
        )?;
        write!(f, "Extra ({}): {}", self.extra.len(), quoted_list(&self.extra))
    }
}

fn quoted_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{}'", item)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Reads only the header row; an empty file has no headers.
pub fn read_headers(csv_path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)?;

    let mut record = csv::StringRecord::new();
    if reader.read_record(&mut record)? {
        Ok(record.iter().map(|h| h.to_string()).collect())
    } else {
        Ok(Vec::new())
    }
}

/// `Ok(None)` when the file does not exist.
pub fn check_headers(csv_path: &Path) -> Result<Option<HeaderReport>> {
    if !csv_path.exists() {
        return Ok(None);
    }
    let headers = read_headers(csv_path)?;
    Ok(Some(HeaderReport::compare(headers, &EXPECTED_COLUMNS)))
}
