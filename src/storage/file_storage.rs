use crate::{error::Result, storage::Storage};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage implementation
///
/// Each slot becomes one JSON file inside a `.laneboard` directory under the
/// given root, so the board survives across sessions the way localStorage
/// does in the browser build.
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const LANEBOARD_DIR: &'static str = ".laneboard";

    /// Creates a new FileStorage rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().join(Self::LANEBOARD_DIR),
        }
    }

    fn slot_file(&self, key: &str) -> PathBuf {
        // Storage keys carry ':' separators; keep file names portable.
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root_path.join(format!("{name}.json"))
    }

    async fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.slot_file(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_directory_exists().await?;

        fs::write(self.slot_file(key), value).await?;
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let file_path = self.slot_file(key);

        if file_path.exists() {
            fs::remove_file(file_path).await?;
        }
        Ok(())
    }
}
