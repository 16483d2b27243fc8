//! Animated WebP conversion
//!
//! Drives the external `img2webp` encoder to turn folders of PNG frames
//! into animated WebP files.

mod batch;
mod encoder;

pub use batch::{plan_run, run_batch, PreconditionError, RunPlan, RunRequest, DEFAULT_WORKERS};
pub use encoder::{build_encoder_args, run_encoder, ENCODER_POLL_INTERVAL};

use std::path::PathBuf;

#[cfg(windows)]
const ENCODER_BINARY: &str = "img2webp.exe";
#[cfg(not(windows))]
const ENCODER_BINARY: &str = "img2webp";

/// Get the path to the bundled img2webp binary
///
/// In development, looks for it at CARGO_MANIFEST_DIR/resources/bin/img2webp.
/// In release builds it is expected to be bundled next to the executable.
pub fn get_encoder_path() -> Result<PathBuf, String> {
    // Try CARGO_MANIFEST_DIR first (development mode)
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let dev_path = PathBuf::from(manifest_dir)
            .join("resources")
            .join("bin")
            .join(ENCODER_BINARY);

        if dev_path.exists() {
            log::debug!("Found img2webp at development path: {:?}", dev_path);
            return Ok(dev_path);
        }
    }

    // Try relative to current executable (release mode)
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            // macOS app bundle: Contents/MacOS/../Resources/bin/img2webp
            let bundle_path = exe_dir
                .join("..")
                .join("Resources")
                .join("bin")
                .join(ENCODER_BINARY);

            if bundle_path.exists() {
                log::debug!("Found img2webp at bundle path: {:?}", bundle_path);
                return Ok(bundle_path);
            }

            // Also try directly next to executable
            let local_path = exe_dir.join("resources").join("bin").join(ENCODER_BINARY);
            if local_path.exists() {
                log::debug!("Found img2webp at local path: {:?}", local_path);
                return Ok(local_path);
            }
        }
    }

    Err(format!(
        "{} binary not found. Expected at resources/bin/{}",
        ENCODER_BINARY, ENCODER_BINARY
    ))
}

/// Verify that img2webp exists and is executable
pub fn verify_encoder() -> Result<PathBuf, String> {
    let path = get_encoder_path()?;

    if !path.exists() {
        return Err(format!("img2webp not found at {:?}", path));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = std::fs::metadata(&path)
            .map_err(|e| format!("Failed to get img2webp metadata: {}", e))?;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(format!("img2webp at {:?} is not executable", path));
        }
    }

    log::info!("img2webp verified at: {:?}", path);
    Ok(path)
}
