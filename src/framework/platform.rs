//! Host platform collaborators: saving downloaded files and opening URLs.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use tracing::info;

/// Client-side "save as" for blobs fetched from the server.
#[async_trait]
pub trait FileSaver: Send + Sync + 'static {
    async fn save(&self, file_name: &str, mime_type: &str, bytes: Vec<u8>) -> io::Result<()>;
}

/// Opens a URL outside the console (a new browser tab).
pub trait Browser: Send + Sync + 'static {
    fn open(&self, url: &str);
}

/// Saves files into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl FileSaver for DirectorySaver {
    async fn save(&self, file_name: &str, mime_type: &str, bytes: Vec<u8>) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(file_name);
        let size = bytes.len();
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), mime_type, size, "Saved download");
        Ok(())
    }
}

/// Browser that only logs the URL. Used by the headless console.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingBrowser;

impl Browser for LoggingBrowser {
    fn open(&self, url: &str) {
        info!(url, "Open in browser");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn directory_saver_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path().join("exports"));
        saver.save("a.csv", "text/csv", b"id\n1\n".to_vec()).await.unwrap();
        let written = std::fs::read(dir.path().join("exports/a.csv")).unwrap();
        assert_eq!(written, b"id\n1\n");
    }
}
