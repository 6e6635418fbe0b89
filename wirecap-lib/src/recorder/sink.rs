use std::future::Future;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Destination for encoded records
///
/// One call per record; `name` is unique per record.
pub trait RecordSink: Send + Sync + 'static {
    fn write(&self, name: &str, bytes: Vec<u8>) -> impl Future<Output = std::io::Result<()>> + Send;
}

/// Writes each record to its own file inside a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Use `dir`, creating it (and its parents) if needed
    pub async fn create(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RecordSink for DirectorySink {
    fn write(&self, name: &str, bytes: Vec<u8>) -> impl Future<Output = std::io::Result<()>> + Send {
        let path = self.dir.join(name);
        async move { tokio::fs::write(path, bytes).await }
    }
}

/// File name for a new record: `save.<uuid>`
pub fn record_name() -> String {
    format!("save.{}", Uuid::new_v4())
}
