use std::fmt;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crdl_fetch::RetrievalHandle;
use crdl_store::CacheEntry;
use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::progress::{InstallPhase, Progress, ProgressCallback};

/// Turns a located artifact into a populated cache entry.
///
/// The body is written to the entry's temporary archive, which must not
/// exist beforehand. The archive is unpacked into the staging directory and
/// renamed to the entry path, then deleted. On failure the archive stays
/// where it is.
#[derive(Clone, Default)]
pub struct Acquirer {
    on_progress: Option<ProgressCallback>,
}

impl Acquirer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    pub async fn acquire(&self, handle: RetrievalHandle, entry: &CacheEntry) -> Result<PathBuf> {
        let archive = entry.archive_path().to_path_buf();
        let file = crdl_fs::create_new(&archive).map_err(Error::from_create)?;
        let total_bytes = handle.content_length;

        let written = self
            .download(handle, File::from_std(file), &archive, total_bytes)
            .await?;
        debug!("wrote {written} bytes to {}", archive.display());

        self.report(InstallPhase::Extracting, written, total_bytes);
        let zip_path = archive.clone();
        let staging = entry.staging_path().to_path_buf();
        let destination = entry.path().to_path_buf();
        let (path, report) = tokio::task::spawn_blocking(move || -> Result<_> {
            let file = std::fs::File::open(&zip_path).map_err(|source| crdl_fs::Error::Read {
                path: zip_path.clone(),
                source,
            })?;
            Ok(crdl_archive::extract_to_workspace(
                BufReader::new(file),
                &staging,
                &destination,
            )?)
        })
        .await??;
        debug!("unpacked {} entries into {}", report.entry_count, path.display());

        tokio::fs::remove_file(&archive)
            .await
            .map_err(|source| crdl_fs::Error::Write {
                path: archive.clone(),
                source,
            })?;

        self.report(InstallPhase::Completed, written, total_bytes);
        Ok(path)
    }

    async fn download(
        &self,
        handle: RetrievalHandle,
        mut file: File,
        path: &Path,
        total_bytes: Option<u64>,
    ) -> Result<u64> {
        let write_err = |source: std::io::Error| crdl_fs::Error::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut body = handle.into_body();
        let mut written = 0u64;
        self.report(InstallPhase::Downloading, written, total_bytes);

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(write_err)?;
            written += chunk.len() as u64;
            self.report(InstallPhase::Downloading, written, total_bytes);
        }

        file.flush().await.map_err(write_err)?;
        file.sync_all().await.map_err(write_err)?;
        Ok(written)
    }

    fn report(&self, phase: InstallPhase, bytes_downloaded: u64, total_bytes: Option<u64>) {
        if let Some(ref callback) = self.on_progress {
            callback(&Progress {
                phase,
                bytes_downloaded,
                total_bytes,
            });
        }
    }
}

impl fmt::Debug for Acquirer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Acquirer")
            .field("on_progress", &self.on_progress.as_ref().map(|_| "{ ... }"))
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::{Cursor, Write};
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;
    use crdl_fetch::ArchiveCoordinate;
    use crdl_platform::PlatformKey;
    use crdl_store::CacheStore;
    use futures_util::stream;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    use super::*;

    pub(crate) const LINUX: PlatformKey = PlatformKey {
        prefix: "Linux_x64",
        artifact: "chrome-linux.zip",
    };

    pub(crate) fn build_zip(marker: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.add_directory("chrome-linux/", options).unwrap();
        writer.start_file("chrome-linux/chrome", options).unwrap();
        writer.write_all(marker.as_bytes()).unwrap();
        writer.start_file("chrome-linux/libGLESv2.so", options).unwrap();
        writer.write_all(b"so").unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn handle_for(bytes: Vec<u8>, content_length: Option<u64>) -> RetrievalHandle {
        let (head, tail) = bytes.split_at(bytes.len() / 2);
        let chunks = vec![
            Ok(Bytes::copy_from_slice(head)),
            Ok(Bytes::copy_from_slice(tail)),
        ];
        RetrievalHandle::new(
            ArchiveCoordinate::new(LINUX.prefix, 998, LINUX.artifact),
            "http://archive.test/o/Linux_x64%2F998%2Fchrome-linux.zip?alt=media",
            content_length,
            Box::pin(stream::iter(chunks)),
        )
    }

    #[tokio::test]
    async fn unpacks_into_entry_and_removes_archive() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let entry = store.entry("119", &LINUX);

        let path = Acquirer::new()
            .acquire(handle_for(build_zip("998"), None), &entry)
            .await
            .unwrap();

        assert_eq!(path, entry.path());
        assert_eq!(std::fs::read(path.join("chrome-linux/chrome")).unwrap(), b"998");
        assert!(!entry.archive_path().exists());
        assert!(!entry.staging_path().exists());
    }

    #[tokio::test]
    async fn existing_archive_is_a_collision() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let entry = store.entry("119", &LINUX);
        std::fs::write(entry.archive_path(), "someone else's").unwrap();

        let result = Acquirer::new()
            .acquire(handle_for(build_zip("998"), None), &entry)
            .await;

        assert!(matches!(result, Err(Error::TemporaryFileCollision { .. })));
        assert_eq!(std::fs::read(entry.archive_path()).unwrap(), b"someone else's");
        assert!(!entry.path().exists());
    }

    #[tokio::test]
    async fn corrupt_body_keeps_archive_and_no_entry() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let entry = store.entry("119", &LINUX);

        let result = Acquirer::new()
            .acquire(handle_for(b"not a zip at all".to_vec(), None), &entry)
            .await;

        assert!(matches!(result, Err(Error::Archive(_))));
        assert!(entry.archive_path().exists());
        assert!(!entry.path().exists());
        assert!(!entry.staging_path().exists());
    }

    #[tokio::test]
    async fn interrupted_body_keeps_partial_archive() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let entry = store.entry("119", &LINUX);
        let url = "http://archive.test/o/Linux_x64%2F998%2Fchrome-linux.zip?alt=media";
        let chunks = vec![
            Ok(Bytes::from_static(b"PK\x03\x04partial")),
            Err(crdl_fetch::Error::ArchiveTransport {
                url: url.to_string(),
                reason: "connection reset".to_string(),
            }),
        ];
        let handle = RetrievalHandle::new(
            ArchiveCoordinate::new(LINUX.prefix, 998, LINUX.artifact),
            url,
            None,
            Box::pin(stream::iter(chunks)),
        );

        let result = Acquirer::new().acquire(handle, &entry).await;

        assert!(matches!(
            result,
            Err(Error::Fetch(crdl_fetch::Error::ArchiveTransport { .. }))
        ));
        assert_eq!(std::fs::read(entry.archive_path()).unwrap(), b"PK\x03\x04partial");
        assert!(!entry.path().exists());
        assert!(!entry.staging_path().exists());
    }

    #[tokio::test]
    async fn reports_progress() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let entry = store.entry("119", &LINUX);
        let bytes = build_zip("998");
        let len = bytes.len() as u64;

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        Acquirer::new()
            .on_progress(Arc::new(move |p: &Progress| sink.lock().unwrap().push(p.clone())))
            .acquire(handle_for(bytes, Some(len)), &entry)
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.first().unwrap().bytes_downloaded, 0);
        let last = seen.last().unwrap();
        assert_eq!(last.phase, InstallPhase::Completed);
        assert_eq!(last.bytes_downloaded, len);
        assert_eq!(last.total_bytes, Some(len));
        assert!(seen.iter().any(|p| p.phase == InstallPhase::Extracting));
    }
}
