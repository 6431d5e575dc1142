//! Reading input for the command-line driver: decoding and directory traversal.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Decode raw bytes with a WHATWG encoding label. A byte-order mark wins over the label.
pub fn decode_bytes(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))?;
    let (text, used, had_errors) = encoding.decode(bytes);
    if used != encoding {
        log::debug!("byte-order mark selects {} over {}", used.name(), encoding.name());
    }
    if had_errors {
        log::warn!("malformed {} input, replacement characters inserted", used.name());
    }
    Ok(text.into_owned())
}

pub fn read_file(path: &Path, label: &str) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    decode_bytes(&bytes, label)
}

pub fn read_stdin(label: &str) -> Result<String> {
    let mut bytes = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io("<stdin>", e))?;
    decode_bytes(&bytes, label)
}

fn is_hidden_or_backup(name: &str) -> bool {
    name.starts_with('.') || name.ends_with('~')
}

/// All regular files under `root`, recursively, sorted by path.
///
/// Hidden directories, hidden files and editor backups (`name~`) are skipped.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(root).sort_by_file_name().into_iter().filter_entry(|entry| {
        let keep = entry.depth() == 0 || !is_hidden_or_backup(&entry.file_name().to_string_lossy());
        if !keep {
            log::debug!("skipping {}", entry.path().display());
        }
        keep
    });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, io::Error::from(e))
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Where `file` (found under `input_root`) lands under `output_root`.
pub fn mirror_path(input_root: &Path, file: &Path, output_root: &Path) -> PathBuf {
    match file.strip_prefix(input_root) {
        Ok(relative) => output_root.join(relative),
        Err(_) => output_root.join(file.file_name().unwrap_or(file.as_os_str())),
    }
}
