//! Frame discovery for source folders
//!
//! A source folder is a flat directory of still images. The animation frame
//! order is the lexicographic byte order of the file names, so numbered
//! sequences ("frame_001.png", "frame_002.png", ...) play in the obvious
//! order regardless of locale.

use std::fs;
use std::path::Path;

/// Check whether a file name has a `.png` extension (case-insensitive)
pub fn is_png_file(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".png")
}

/// List the PNG frames of a source folder, sorted into frame order.
///
/// Only regular files directly inside `dir` are considered; subdirectories
/// are never recursed into. Names are returned as stored on disk (case is
/// preserved) and sorted by plain byte order. Frames are re-enumerated on
/// every conversion run rather than cached, so edits between runs are
/// always picked up.
pub fn list_png_frames(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("Failed to read folder {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut frames: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        // Non-UTF-8 names can't be passed through as relative encoder args
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_png_file(name))
        .collect();

    frames.sort();
    frames
}
