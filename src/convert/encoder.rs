//! img2webp subprocess handling
//!
//! Builds and runs one encoder invocation per source folder. The child runs
//! with its working directory set to the source folder so frame file names
//! stay relative, and its wait loop observes the run's cancellation flag at
//! a fixed interval so cancel takes effect within one poll.

use std::ffi::OsString;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::process::Command;

use crate::core::JobOutcome;

/// How often an in-flight encoder wait re-checks the cancellation flag
pub const ENCODER_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Build the img2webp argument list for one folder.
///
/// Quality 100 selects lossless mode; anything below passes the numeric
/// quality through in lossy mode. Every frame carries its own display
/// delay. `-loop 0` means loop forever, `-loop 1` plays once.
pub fn build_encoder_args(
    frames: &[String],
    delay_ms: u32,
    quality: u8,
    loop_forever: bool,
    output: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(frames.len() * 3 + 8);

    if quality == 100 {
        args.extend(["-lossless", "-q", "100"].map(OsString::from));
    } else {
        args.extend(["-lossy", "-q"].map(OsString::from));
        args.push(quality.to_string().into());
    }

    let delay = delay_ms.to_string();
    for frame in frames {
        args.push("-d".into());
        args.push(delay.clone().into());
        args.push(frame.clone().into());
    }

    args.push("-loop".into());
    args.push(if loop_forever { "0" } else { "1" }.into());
    args.push("-o".into());
    args.push(output.as_os_str().to_owned());

    args
}

/// Run one encoder invocation and wait for it, honoring cancellation.
///
/// Precondition: `frames` is non-empty; empty folders are reported as
/// `NoFrames` by the orchestrator and never reach this function.
///
/// A pre-existing file at `output` is deleted first (best-effort). The
/// wait races the child against the cancellation flag: once cancel is
/// observed the child is killed and the job reports `Failed` without
/// waiting out the encode. Spawn failures are logged and reported as
/// `Failed`, never propagated.
pub async fn run_encoder(
    encoder: &Path,
    source_dir: &Path,
    frames: &[String],
    delay_ms: u32,
    quality: u8,
    loop_forever: bool,
    output: &Path,
    cancel: &AtomicBool,
) -> JobOutcome {
    // Always overwrite any old file; the encoder handles the rest
    if output.is_file() {
        let _ = std::fs::remove_file(output);
    }

    let args = build_encoder_args(frames, delay_ms, quality, loop_forever, output);

    log::debug!(
        "Encoding {} ({} frames, delay {}ms, quality {}, loop {}) -> {}",
        source_dir.display(),
        frames.len(),
        delay_ms,
        quality,
        loop_forever,
        output.display()
    );

    let mut command = Command::new(encoder);
    command.args(&args).current_dir(source_dir).kill_on_drop(true);

    // No visible console window for the encoder child
    #[cfg(windows)]
    command.creation_flags(0x0800_0000); // CREATE_NO_WINDOW

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            log::error!("Failed to spawn img2webp for {}: {}", source_dir.display(), e);
            return JobOutcome::Failed;
        }
    };

    loop {
        tokio::select! {
            status = child.wait() => {
                return match status {
                    Ok(status) if status.success() && !cancel.load(Ordering::SeqCst) => {
                        JobOutcome::Success
                    }
                    Ok(status) => {
                        if !cancel.load(Ordering::SeqCst) {
                            log::error!(
                                "img2webp exited with status {} for {}",
                                status,
                                source_dir.display()
                            );
                        }
                        JobOutcome::Failed
                    }
                    Err(e) => {
                        log::error!("Failed to wait on img2webp: {}", e);
                        JobOutcome::Failed
                    }
                };
            }
            _ = tokio::time::sleep(ENCODER_POLL_INTERVAL) => {
                if cancel.load(Ordering::SeqCst) {
                    log::info!("Cancellation: terminating encoder for {}", source_dir.display());
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                    return JobOutcome::Failed;
                }
            }
        }
    }
}
