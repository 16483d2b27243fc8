//! Test fixtures for conversion tests
//!
//! Helpers that build throwaway PNG frame folders and stand-in encoder
//! scripts so orchestration tests never need the real img2webp binary.

#![cfg(test)]

use std::path::{Path, PathBuf};

/// Minimal valid PNG file bytes (1x1 transparent pixel).
///
/// The conversion pipeline never decodes frames, so content only needs to
/// look like a PNG on disk.
const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, // signature
    0x00, 0x00, 0x00, 0x0d, b'I', b'H', b'D', b'R', // IHDR
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00,
    0x1f, 0x15, 0xc4, 0x89, // IHDR crc
    0x00, 0x00, 0x00, 0x0a, b'I', b'D', b'A', b'T', // IDAT
    0x78, 0x9c, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01,
    0x0d, 0x0a, 0x2d, 0xb4, // IDAT crc
    0x00, 0x00, 0x00, 0x00, b'I', b'E', b'N', b'D', // IEND
    0xae, 0x42, 0x60, 0x82,
];

/// Write a PNG file named `name` into `dir`
pub fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, PNG_BYTES).expect("Failed to write test PNG");
    path
}

/// Create a folder of sequentially numbered PNG frames under `root`
pub fn create_frames_folder(root: &Path, name: &str, frame_count: usize) -> PathBuf {
    let folder = root.join(name);
    std::fs::create_dir_all(&folder).expect("Failed to create frames folder");
    for i in 1..=frame_count {
        write_png(&folder, &format!("frame_{:03}.png", i));
    }
    folder
}

/// Write an executable shell script that stands in for img2webp.
///
/// `body` is the script body, e.g. "exit 0" or "sleep 30". Unix only; the
/// orchestration tests that use this are gated accordingly.
#[cfg(unix)]
pub fn fake_encoder(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("img2webp");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write fake encoder");
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_png_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = write_png(dir.path(), "a.png");
        assert!(path.exists());
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn test_create_frames_folder() {
        let dir = TempDir::new().unwrap();
        let folder = create_frames_folder(dir.path(), "clip", 3);
        assert!(folder.join("frame_001.png").exists());
        assert!(folder.join("frame_003.png").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_fake_encoder_is_executable() {
        use std::process::Command;

        let dir = TempDir::new().unwrap();
        let encoder = fake_encoder(dir.path(), "exit 7");
        let status = Command::new(&encoder).status().unwrap();
        assert_eq!(status.code(), Some(7));
    }
}
