//! Markdown file import and export.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{EditorError, Result};

/// Whether `name` is accepted for import. The check is case-sensitive.
pub fn is_markdown_name(name: &str) -> bool {
    name.ends_with(".md")
}

/// Read a markdown file for import.
///
/// # Errors
/// [`EditorError::UnsupportedFileType`] when the file name does not end in
/// `.md`; [`EditorError::Read`] when the file cannot be read. Invalid UTF-8
/// is replaced with U+FFFD rather than rejected.
pub fn import_markdown(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !is_markdown_name(&name) {
        tracing::debug!(path = %path.display(), "import.rejected");
        return Err(EditorError::UnsupportedFileType { name });
    }
    let bytes = fs::read(path).map_err(|source| EditorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(path = %path.display(), "import.invalid_utf8");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    tracing::info!(path = %path.display(), bytes = content.len(), "import.read");
    Ok(content)
}

/// `markdown-<unix epoch ms>.md`
pub fn export_filename(now: SystemTime) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis());
    format!("markdown-{millis}.md")
}

/// Write `content` verbatim to a fresh export file inside `dir`.
///
/// # Errors
/// [`EditorError::Write`] when the directory or file cannot be written.
pub fn export_to(dir: &Path, content: &str, now: SystemTime) -> Result<PathBuf> {
    let path = dir.join(export_filename(now));
    let write = || -> std::io::Result<()> {
        fs::create_dir_all(dir)?;
        fs::write(&path, content)
    };
    write().map_err(|source| EditorError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = content.len(), "export.write");
    Ok(path)
}
