use crate::core::Pipeline;
use crate::utils::error::Result;
use std::path::PathBuf;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<Option<PathBuf>> {
        tracing::debug!("Extracting records");
        let raw_data = self.pipeline.extract()?;
        tracing::info!("Extracted {} records", raw_data.len());

        let table = self.pipeline.transform(raw_data)?;
        tracing::debug!(
            "Transformed {} rows across {} columns",
            table.rows.len(),
            table.fieldnames.len()
        );

        let output_path = self.pipeline.load(table)?;
        if let Some(path) = &output_path {
            tracing::debug!("Output saved to: {}", path.display());
        }

        Ok(output_path)
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }
}
