use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: Option<PathBuf>,
}

impl LocalStorage {
    /// Resolve relative paths against `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
