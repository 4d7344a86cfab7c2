use crate::domain::model::NormalizedTable;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::path::{Path, PathBuf};

pub fn render_csv(table: &NormalizedTable) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(&table.fieldnames)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.into_inner().map_err(|e| EtlError::IoError(e.into_error()))
}

/// Writes the table to `path`, replacing any previous file.
///
/// An empty table writes nothing and returns `Ok(None)`.
pub fn write_csv<S: Storage>(
    storage: &S,
    path: &Path,
    table: &NormalizedTable,
) -> Result<Option<PathBuf>> {
    if table.is_empty() {
        tracing::info!("No records to write for {}", path.display());
        return Ok(None);
    }

    let data = render_csv(table)?;
    tracing::debug!("Writing CSV file ({} bytes) to {}", data.len(), path.display());
    storage.write_file(path, &data)?;

    Ok(Some(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    }

    impl Storage for MockStorage {
        fn list_files(&self, _dir: &Path, _pattern: &str) -> Result<Vec<PathBuf>> {
            Ok(Vec::new())
        }

        fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                ))
            })
        }

        fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }

        fn ensure_dir(&self, _dir: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn table(fieldnames: &[&str], rows: &[&[&str]]) -> NormalizedTable {
        NormalizedTable {
            fieldnames: fieldnames.iter().map(|f| f.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_render_csv_quotes_fields() {
        let table = table(
            &["ts", "episode_name", "meta"],
            &[&["t1", "Hello, World", r#"{"a":"b"}"#], &["t2", "", "line\nbreak"]],
        );
        let csv = String::from_utf8(render_csv(&table).unwrap()).unwrap();
        assert_eq!(
            csv,
            "ts,episode_name,meta\r\nt1,\"Hello, World\",\"{\"\"a\"\":\"\"b\"\"}\"\r\nt2,,\"line\nbreak\"\r\n"
        );
    }

    #[test]
    fn test_write_csv_skips_empty_table() {
        let storage = MockStorage::default();
        let path = Path::new("out/combined.csv");
        let empty = table(&["ts", "skipped"], &[]);

        let written = write_csv(&storage, path, &empty).unwrap();

        assert!(written.is_none());
        assert!(storage.read_file(path).is_err());
    }

    #[test]
    fn test_write_csv_overwrites() {
        let storage = MockStorage::default();
        let path = Path::new("out/combined.csv");

        write_csv(&storage, path, &table(&["a"], &[&["1"], &["2"]])).unwrap();
        let written = write_csv(&storage, path, &table(&["b"], &[&["3"]])).unwrap();

        assert_eq!(written.as_deref(), Some(path));
        assert_eq!(storage.read_file(path).unwrap(), b"b\r\n3\r\n");
    }
}
