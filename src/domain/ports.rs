use crate::domain::model::{NormalizedTable, Record};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub trait Storage {
    /// Files under `dir` matching the relative glob `pattern`, sorted by path.
    /// `pattern` may name subdirectories or use `**`.
    fn list_files(&self, dir: &Path, pattern: &str) -> Result<Vec<PathBuf>>;
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    /// Replaces `path`, creating parent directories as needed.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
    fn ensure_dir(&self, dir: &Path) -> Result<()>;
}

pub trait ConfigProvider {
    fn source_dir(&self) -> &Path;
    fn output_dir(&self) -> &Path;
    fn pattern(&self) -> &str;
    fn output_file_name(&self) -> &str;
    fn renames(&self) -> &[(String, String)];

    fn output_path(&self) -> PathBuf {
        self.output_dir().join(self.output_file_name())
    }
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<Record>>;
    fn transform(&self, data: Vec<Record>) -> Result<NormalizedTable>;
    /// Returns the path of the written file, or `None` when there was nothing to write.
    fn load(&self, table: NormalizedTable) -> Result<Option<PathBuf>>;
}
