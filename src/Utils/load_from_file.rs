use encoding_rs::{Encoding, UTF_16LE};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// errors of reading and converting the instrument exports
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("File or directory '{0}' was not found")]
    NotFound(String),
    #[error("Unknown text encoding '{0}'")]
    UnknownEncoding(String),
    #[error("'{0}' is not a directory")]
    NotADirectory(String),
}

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Encoding by its WHATWG label ("utf-16le", "windows-1252", "utf-8", ...)
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, LoadError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| LoadError::UnknownEncoding(label.to_string()))
}

/// One export file of the instrument and the encoding it is written in.
/// TriStar II writes its exports in UTF-16LE; older versions wrote them in the ANSI code page.
pub struct LoadData {
    pub file_name: PathBuf,
    pub encoding: &'static Encoding,
}

impl LoadData {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        LoadData {
            file_name: file_name.into(),
            encoding: UTF_16LE,
        }
    }

    pub fn with_encoding(file_name: impl Into<PathBuf>, label: &str) -> Result<Self, LoadError> {
        Ok(LoadData {
            file_name: file_name.into(),
            encoding: encoding_for_label(label)?,
        })
    }

    pub fn load_text(&self) -> Result<String, LoadError> {
        read_text(&self.file_name, self.encoding)
    }

    pub fn sample_name(&self) -> String {
        sample_name(&self.file_name)
    }
}

/// Reads the whole file and decodes it. A byte order mark, if present, overrides the encoding.
pub fn read_text(path: &Path, encoding: &'static Encoding) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.display().to_string()));
    }
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    let (text, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        warn!(
            "'{}' contains bytes that are not valid {}, they were replaced",
            path.display(),
            used.name()
        );
    }
    info!("Read '{}' as {}", path.display(), used.name());
    Ok(text.into_owned())
}

/// sample name is the file name without directory and extension
pub fn sample_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// All files in `dir` with the given extension (case-insensitive), sorted by name.
pub fn list_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.exists() {
        return Err(LoadError::NotFound(dir.display().to_string()));
    }
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.display().to_string()));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        let matches = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// path of the output next to the input: "<dir>/<stem><suffix>.xlsx"
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let file_name = format!("{}{}.xlsx", sample_name(input), suffix);
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// UTF-16LE bytes with byte order mark
pub fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + 2 * text.len());
    bytes.extend_from_slice(&[0xFF, 0xFE]);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Rewrites an old ANSI export (or any other encoding) as UTF-16LE, the format newer TriStar versions use.
pub fn convert_to_utf16le(path: &Path, from: &'static Encoding) -> Result<(), LoadError> {
    let text = read_text(path, from)?;
    fs::write(path, encode_utf16le(&text)).map_err(|e| io_error(path, e))?;
    info!("Converted '{}' from {} to UTF-16LE", path.display(), from.name());
    Ok(())
}
