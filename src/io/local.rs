use super::SizeProbe;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Size probe for a file on the local filesystem
pub struct LocalFileProbe {
    path: PathBuf,
}

impl LocalFileProbe {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

#[async_trait]
impl SizeProbe for LocalFileProbe {
    async fn content_length(&self) -> Result<u64> {
        let metadata = fs::metadata(&self.path).await?;

        if metadata.is_dir() {
            bail!("{} is a directory", self.path.display());
        }

        Ok(metadata.len())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
