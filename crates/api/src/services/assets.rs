//! Filesystem store for uploaded product images.
//!
//! Assets are flat files in one directory, named `<unixMillis>-<originalName>`.
//! The millisecond component comes from a process-wide clock that never
//! repeats, and files are opened with create-new semantics, so one upload can
//! never overwrite another. A name already taken on disk (for example by
//! another process sharing the directory) bumps the timestamp and retries.
//!
//! The directory is served read-only at `/uploads` via [`AssetStore::serve_dir`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tower_http::services::ServeDir;

use crate::config::AssetConfig;

/// Name used when an upload's original filename has nothing usable left.
pub const FALLBACK_NAME: &str = "upload";

/// Longest original-name suffix kept, in bytes. Leaves room for the
/// timestamp prefix under the usual 255-byte filename limit.
const MAX_ORIGINAL_NAME_BYTES: usize = 200;

/// Attempts at finding a free name before giving up.
const MAX_CREATE_ATTEMPTS: usize = 16;

static CLOCK: MonotonicMillis = MonotonicMillis::new();

/// Errors from the asset store.
#[derive(Debug, Error)]
pub enum AssetError {
    /// No asset with this name.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The name cannot refer to a file inside the asset directory.
    #[error("invalid asset name: {0:?}")]
    InvalidName(String),

    /// Filesystem failure.
    #[error("asset I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Milliseconds since the Unix epoch, strictly increasing per instance.
#[derive(Debug)]
pub(crate) struct MonotonicMillis {
    last: AtomicU64,
}

impl MonotonicMillis {
    pub(crate) const fn new() -> Self {
        Self::starting_at(0)
    }

    pub(crate) const fn starting_at(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }

    /// The wall clock, or one past the last value handed out if the wall
    /// clock has not moved on (or went backwards).
    pub(crate) fn next(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        let advance = |last: u64| now.max(last.saturating_add(1));

        match self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| Some(advance(last)))
        {
            Ok(prev) | Err(prev) => advance(prev),
        }
    }
}

/// Image storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct AssetStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl AssetStore {
    /// Create a store from configuration. The directory is created on first write.
    #[must_use]
    pub fn new(config: &AssetConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            max_bytes: config.max_bytes,
        }
    }

    /// Directory holding the assets.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Largest accepted upload in bytes.
    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Persist `bytes` under a freshly generated name and return that name.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::Io` if the directory or file cannot be written.
    pub async fn store(&self, bytes: &[u8], original_name: &str) -> Result<String, AssetError> {
        self.store_with_clock(&CLOCK, bytes, original_name).await
    }

    pub(crate) async fn store_with_clock(
        &self,
        clock: &MonotonicMillis,
        bytes: &[u8],
        original_name: &str,
    ) -> Result<String, AssetError> {
        fs::create_dir_all(&self.dir).await?;
        let suffix = sanitize_original_name(original_name);

        for _ in 0..MAX_CREATE_ATTEMPTS {
            let name = format!("{}-{suffix}", clock.next());
            let path = self.dir.join(&name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(name = %name, "Asset name taken, retrying");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let written = match file.write_all(bytes).await {
                Ok(()) => file.sync_all().await,
                Err(e) => Err(e),
            };
            if let Err(e) = written {
                drop(file);
                if let Err(cleanup) = fs::remove_file(&path).await {
                    tracing::warn!(name = %name, error = %cleanup, "Failed to remove partial asset");
                }
                return Err(e.into());
            }

            tracing::info!(name = %name, size = bytes.len(), "Stored asset");
            return Ok(name);
        }

        Err(AssetError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free asset name for {suffix:?} after {MAX_CREATE_ATTEMPTS} attempts"),
        )))
    }

    /// Read an asset's bytes.
    ///
    /// In-process counterpart of [`serve_dir`](Self::serve_dir), which serves
    /// the same files over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::NotFound` if there is no such asset,
    /// `AssetError::InvalidName` if the name escapes the directory.
    pub async fn retrieve(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.checked_path(name)?;
        fs::read(&path).await.map_err(|e| not_found_or_io(e, name))
    }

    /// Remove an asset.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::NotFound` if there is no such asset,
    /// `AssetError::InvalidName` if the name escapes the directory.
    pub async fn delete(&self, name: &str) -> Result<(), AssetError> {
        let path = self.checked_path(name)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| not_found_or_io(e, name))?;
        tracing::info!(name = %name, "Deleted asset");
        Ok(())
    }

    /// Names of all stored assets, sorted. A missing directory is empty.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::Io` if the directory cannot be read.
    pub async fn list(&self) -> Result<Vec<String>, AssetError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read-only HTTP service over the asset directory.
    #[must_use]
    pub fn serve_dir(&self) -> ServeDir {
        ServeDir::new(&self.dir)
    }

    /// Resolve a stored name to a path, refusing anything but a plain
    /// filename. Image names on update come from the client verbatim.
    fn checked_path(&self, name: &str) -> Result<PathBuf, AssetError> {
        let plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\'])
            && !name.chars().any(char::is_control);
        if !plain {
            return Err(AssetError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(name))
    }
}

fn not_found_or_io(err: std::io::Error, name: &str) -> AssetError {
    if err.kind() == ErrorKind::NotFound {
        AssetError::NotFound(name.to_string())
    } else {
        AssetError::Io(err)
    }
}

/// Reduce a client-supplied filename to something safe to embed in a
/// generated name: last path component, no control characters, bounded length.
pub(crate) fn sanitize_original_name(raw: &str) -> String {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return FALLBACK_NAME.to_string();
    }

    let mut end = cleaned.len().min(MAX_ORIGINAL_NAME_BYTES);
    while !cleaned.is_char_boundary(end) {
        end -= 1;
    }
    cleaned[..end].to_string()
}
