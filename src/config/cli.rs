use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Local filesystem storage.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    fn list_files(&self, dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        // 目錄名稱可能含 glob 特殊字元，先跳脫再接上樣式
        let escaped = glob::Pattern::escape(&dir.to_string_lossy());
        let full = Path::new(&escaped).join(pattern);

        let mut files = Vec::new();
        for entry in glob::glob(&full.to_string_lossy())? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!("Skipping unreadable path {}: {}", e.path().display(), e),
            }
        }
        files.sort();
        Ok(files)
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, data)?;
        Ok(())
    }
}
