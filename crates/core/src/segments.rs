//! Segment directory access for the live stream output.
//!
//! An external media pipeline writes a playlist and its media segments into
//! one directory. This module resolves client-requested names inside that
//! directory (never outside it), applies the `.tmp` playlist fallback used
//! while the pipeline is mid-write, and produces directory diagnostics.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Extension of the playlist (manifest) files.
pub const PLAYLIST_EXTENSION: &str = ".m3u8";

/// Suffix the pipeline appends to a playlist while it is being rewritten.
pub const TMP_SUFFIX: &str = ".tmp";

/// How many times [`SegmentDirectory::fetch`] re-resolves a file that vanished
/// between lookup and read (the pipeline renamed `<name>.tmp` away).
const FETCH_ATTEMPTS: usize = 2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A file inside the segment directory that can be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedFile {
    /// Canonical on-disk path of the file being served.
    pub path: PathBuf,
    /// Content type derived from the requested name.
    pub content_type: &'static str,
    /// Whether the requested name is a playlist.
    pub is_playlist: bool,
    /// Whether the in-progress `<name>.tmp` file was used.
    pub from_tmp: bool,
}

/// Diagnostic payload for a requested file that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingFile {
    /// Absolute path that was looked up.
    pub looking_for: String,
    /// Current entries of the segment directory.
    pub files_in_dir: Vec<String>,
}

/// Outcome of looking up a requested name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    Found(ServedFile),
    Missing(MissingFile),
}

/// Outcome of looking up and reading a requested name.
#[derive(Debug)]
pub enum Fetched {
    Found { file: ServedFile, bytes: Vec<u8> },
    Missing(MissingFile),
}

/// Operational snapshot of the segment directory.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryReport {
    /// Directory as configured.
    #[serde(rename = "HLS_DIR")]
    pub hls_dir: String,
    /// Absolute form of the configured directory.
    pub absolute_path: String,
    /// Current entries of the directory.
    pub files: Vec<String>,
}

// ---------------------------------------------------------------------------
// Segment directory
// ---------------------------------------------------------------------------

/// Read-only view of the directory the media pipeline writes into.
#[derive(Debug, Clone)]
pub struct SegmentDirectory {
    root: PathBuf,
}

impl SegmentDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory as configured.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute form of the root. Canonical when the directory exists,
    /// otherwise the configured path made absolute against the working dir.
    pub async fn absolute_root(&self) -> PathBuf {
        match tokio::fs::canonicalize(&self.root).await {
            Ok(path) => path,
            Err(_) => std::path::absolute(&self.root).unwrap_or_else(|_| self.root.clone()),
        }
    }

    /// Join a client-supplied relative name onto the root.
    ///
    /// Only plain path segments are accepted: absolute paths, empty, `.` or
    /// `..` segments anywhere in the name, backslashes and NUL bytes are
    /// rejected with [`CoreError::Validation`].
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, CoreError> {
        let reject = || CoreError::Validation(format!("Invalid stream path '{relative}'"));

        if relative.is_empty() || relative.contains('\\') || relative.contains('\0') {
            return Err(reject());
        }

        if relative
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(reject());
        }

        let path = Path::new(relative);
        if !path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(reject());
        }

        Ok(self.root.join(path))
    }

    /// Find the file to serve for `relative`.
    ///
    /// 1. The file itself, if present.
    /// 2. For playlists, `<name>.tmp` if present.
    /// 3. Otherwise a [`MissingFile`] with the directory listing.
    pub async fn locate(&self, relative: &str) -> Result<Located, CoreError> {
        let candidate = self.resolve(relative)?;
        let content_type = content_type_for(relative);
        let is_playlist = is_playlist(relative);

        if let Some(path) = self.existing_file(&candidate).await? {
            return Ok(Located::Found(ServedFile {
                path,
                content_type,
                is_playlist,
                from_tmp: false,
            }));
        }

        if is_playlist {
            let tmp = with_suffix(&candidate, TMP_SUFFIX);
            if let Some(path) = self.existing_file(&tmp).await? {
                tracing::debug!(path = %tmp.display(), "Serving in-progress playlist");
                return Ok(Located::Found(ServedFile {
                    path,
                    content_type,
                    is_playlist,
                    from_tmp: true,
                }));
            }
        }

        let looking_for = self.absolute_root().await.join(relative);
        Ok(Located::Missing(MissingFile {
            looking_for: looking_for.display().to_string(),
            files_in_dir: self.list_files().await?,
        }))
    }

    /// Locate and read `relative`.
    ///
    /// A file can disappear between lookup and read when the pipeline renames
    /// `<name>.tmp` over `<name>`; the lookup is then repeated once.
    pub async fn fetch(&self, relative: &str) -> Result<Fetched, CoreError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let file = match self.locate(relative).await? {
                Located::Found(file) => file,
                Located::Missing(missing) => return Ok(Fetched::Missing(missing)),
            };

            match tokio::fs::read(&file.path).await {
                Ok(bytes) => return Ok(Fetched::Found { file, bytes }),
                Err(e) if e.kind() == ErrorKind::NotFound && attempt < FETCH_ATTEMPTS => {
                    tracing::debug!(path = %file.path.display(), "File vanished before read, retrying");
                }
                Err(e) => {
                    return Err(CoreError::Internal(format!(
                        "Failed to read {}: {e}",
                        file.path.display()
                    )))
                }
            }
        }
    }

    /// Sorted entry names of the root directory.
    ///
    /// A root that does not exist yet (pipeline still starting) lists as empty.
    pub async fn list_files(&self) -> Result<Vec<String>, CoreError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.root, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&self.root, e))?
        {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// Configured directory, its absolute form, and its current listing.
    pub async fn inspect(&self) -> Result<DirectoryReport, CoreError> {
        Ok(DirectoryReport {
            hls_dir: self.root.display().to_string(),
            absolute_path: self.absolute_root().await.display().to_string(),
            files: self.list_files().await?,
        })
    }

    /// Canonical path of `path` if it is a regular file inside the root.
    async fn existing_file(&self, path: &Path) -> Result<Option<PathBuf>, CoreError> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Ok(None)
            }
            Err(e) => return Err(io_error(path, e)),
        }

        let canonical = tokio::fs::canonicalize(path)
            .await
            .map_err(|e| io_error(path, e))?;
        let root = tokio::fs::canonicalize(&self.root)
            .await
            .map_err(|e| io_error(&self.root, e))?;

        if !canonical.starts_with(&root) {
            tracing::warn!(path = %path.display(), "Stream path resolves outside the segment directory");
            return Err(CoreError::Validation(format!(
                "Stream path '{}' resolves outside the segment directory",
                path.display()
            )));
        }

        Ok(Some(canonical))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns `true` if `name` is a playlist.
pub fn is_playlist(name: &str) -> bool {
    name.ends_with(PLAYLIST_EXTENSION)
}

/// Guess a Content-Type from a requested file name.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "m3u8" => "application/vnd.apple.mpegurl",
        "ts" => "video/mp2t",
        "m4s" => "video/iso.segment",
        "mp4" => "video/mp4",
        "aac" => "audio/aac",
        "vtt" => "text/vtt",
        _ => "application/octet-stream",
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}

fn io_error(path: &Path, err: std::io::Error) -> CoreError {
    CoreError::Internal(format!("Filesystem error on {}: {err}", path.display()))
}
