//! Path normalization for external-tool arguments

use std::path::{Path, PathBuf};

/// Lexically absolutize a path against the current directory.
///
/// Symlinks are left alone: the external tool receives the path the user
/// configured, not its resolved target. Windows verbatim prefixes are
/// stripped so the result stays tool-friendly.
pub fn absolutize(path: &Path) -> PathBuf {
    match std::path::absolute(path) {
        Ok(abs) => dunce::simplified(&abs).to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

/// Whether a path denotes a filesystem root (no parent directory).
pub fn is_filesystem_root(path: &Path) -> bool {
    absolutize(path).parent().is_none()
}

/// Render a path as a command-line argument for the external tool.
///
/// A bare drive root keeps its trailing separator after absolutization
/// (`D:\`), which robocopy reads as an escaped quote; such paths are
/// shortened to the two-character drive designator (`D:`).
pub fn tool_argument(path: &Path) -> String {
    trim_drive_root(absolutize(path).to_string_lossy().into_owned())
}

fn trim_drive_root(path: String) -> String {
    let bytes = path.as_bytes();
    if bytes.len() == 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
    {
        path[..2].to_string()
    } else {
        path
    }
}
