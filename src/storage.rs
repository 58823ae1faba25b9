use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::config::uploads_dir_name;
use crate::error::{Error, Result};
use crate::models::Dataset;

/// The dataset file on disk.
///
/// Every save rewrites the whole document. Two processes saving at once
/// race and the last write wins.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the dataset.
    ///
    /// Returns an empty dataset if the file does not exist. A file that
    /// exists but does not parse is an error; nothing is recovered.
    pub fn load(&self) -> Result<Dataset> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no dataset yet, starting empty");
            return Ok(Dataset::default());
        }
        let s = fs::read_to_string(&self.path)?;
        let data: Dataset = serde_json::from_str(&s).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(
            path = %self.path.display(),
            cars = data.cars.len(),
            "dataset loaded"
        );
        Ok(data)
    }

    /// Saves the whole dataset, replacing the previous document.
    ///
    /// The document is written to a sibling temp file first and then renamed
    /// over the target, so readers never see a half-written file.
    pub fn save(&self, data: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let s = serde_json::to_string_pretty(data)?;

        let tmp = self.temp_path();
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)?;
        f.write_all(s.as_bytes())?;
        f.sync_all()?;
        drop(f);
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), bytes = s.len(), "dataset saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// An image handed in for a car: the original file name and its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub contents: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }

    /// Reads an image from disk, keeping only its file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read(path).map_err(|source| Error::Upload {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            file_name,
            contents,
        })
    }
}

/// Directory holding uploaded car images.
///
/// Files are stored under their sanitized name. Two uploads with the same
/// name overwrite each other.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Writes the upload and returns the path to record on the car.
    ///
    /// Returns `None` when the upload has no usable file name, which counts
    /// as no image being supplied.
    pub fn store(&self, upload: &ImageUpload) -> Result<Option<String>> {
        let file_name = sanitize_filename(&upload.file_name);
        if file_name.is_empty() {
            debug!(original = %upload.file_name, "upload has no usable file name, ignoring");
            return Ok(None);
        }

        fs::create_dir_all(&self.root).map_err(|source| Error::Upload {
            path: self.root.clone(),
            source,
        })?;
        let target = self.root.join(&file_name);
        fs::write(&target, &upload.contents).map_err(|source| Error::Upload {
            path: target.clone(),
            source,
        })?;

        info!(file = %target.display(), bytes = upload.contents.len(), "image stored");
        Ok(Some(format!("{}/{}", uploads_dir_name(), file_name)))
    }
}

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("Invalid regex pattern"));

/// Reduces an uploaded file name to something safe to create in the uploads directory.
///
/// Accented letters are decomposed (NFKD) and reduced to their ASCII base,
/// path separators become spaces, whitespace runs become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped, and leading or trailing `.` and `_` are
/// stripped. `"../../etc/passwd"` becomes `"etc_passwd"`. The result may be empty.
pub fn sanitize_filename(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS.replace_all(&joined, "");
    cleaned.trim_matches(|c: char| c == '.' || c == '_').to_string()
}
