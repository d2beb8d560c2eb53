//! Page storage
//!
//! Pages are the `*.html` files directly inside the target directory.
//! Rewrites go through a locked temp file and an atomic rename, so an
//! interrupted run leaves each page either untouched or fully rewritten.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

/// A directory of HTML pages
pub struct PageStore {
    dir: PathBuf,
}

impl PageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory holding the pages
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists `*.html` files, sorted by name so runs are reproducible
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read directory: {}", self.dir.display()))?;

        let mut pages = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && path.extension().is_some_and(|e| e == "html") {
                pages.push(path);
            }
        }

        pages.sort();
        Ok(pages)
    }

    /// Reads a page as UTF-8
    pub fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read page: {}", path.display()))
    }

    /// Replaces a page's content atomically. The temp file is removed if
    /// any step fails.
    pub fn write(&self, path: &Path, content: &str) -> Result<()> {
        let temp_path = temp_path_for(path);

        let result = write_locked(&temp_path, content).and_then(|()| {
            fs::rename(&temp_path, path).with_context(|| {
                format!(
                    "Failed to rename {} to {}",
                    temp_path.display(),
                    path.display()
                )
            })
        });

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result.with_context(|| format!("Failed to write page: {}", path.display()))
    }
}

fn write_locked(temp_path: &Path, content: &str) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    file.lock_exclusive()
        .with_context(|| format!("Failed to lock temp file: {}", temp_path.display()))?;

    let mut writer = BufWriter::new(&file);
    writer
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
    writer.flush().context("Failed to flush temp file")?;

    Ok(())
}

/// File name used for matching exclusions and in status lines
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".pagepatch.tmp");
    path.with_file_name(name)
}
