use crate::core::{loader, normalizer, writer};
use crate::core::{ConfigProvider, NormalizedTable, Pipeline, Record, Storage};
use crate::utils::error::Result;
use std::path::PathBuf;

/// Streaming-history export → one combined CSV.
pub struct HistoryPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> HistoryPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for HistoryPipeline<S, C> {
    fn extract(&self) -> Result<Vec<Record>> {
        let source_dir = self.config.source_dir();
        let pattern = self.config.pattern();

        // 輸出目錄在讀檔前建立，沒有符合的檔案時也存在
        self.storage.ensure_dir(self.config.output_dir())?;

        let files = match self.storage.list_files(source_dir, pattern) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("Cannot list {}: {}", source_dir.display(), e);
                Vec::new()
            }
        };
        if files.is_empty() {
            tracing::warn!(
                "No files matching pattern {:?} in {}",
                pattern,
                source_dir.display()
            );
        }

        let mut all_records = Vec::new();
        for file in &files {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            tracing::info!("Processing {}", name);

            // 單一檔案失敗不影響其他檔案
            match loader::read_json_file(&self.storage, file) {
                Ok(records) => {
                    tracing::debug!("Loaded {} records from {}", records.len(), name);
                    all_records.extend(records);
                }
                Err(e) => {
                    tracing::error!("Failed to read {}: {}", file.display(), e);
                }
            }
        }

        Ok(all_records)
    }

    fn transform(&self, data: Vec<Record>) -> Result<NormalizedTable> {
        let table = normalizer::normalize(&data, self.config.renames());
        tracing::debug!(
            "Resolved {} columns: {}",
            table.fieldnames.len(),
            table.fieldnames.join(", ")
        );
        Ok(table)
    }

    fn load(&self, table: NormalizedTable) -> Result<Option<PathBuf>> {
        let output_path = self.config.output_path();
        tracing::info!(
            "Writing combined CSV ({} rows) to {}",
            table.rows.len(),
            self.config.output_file_name()
        );
        writer::write_csv(&self.storage, &output_path, &table)
    }
}
