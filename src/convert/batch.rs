//! Batch conversion orchestrator
//!
//! Validates a run request up front, then drives one encoder invocation
//! per folder through a bounded worker pool. Jobs are independent: one
//! folder failing never aborts the others, and the run only reports done
//! once every dispatched job has returned.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::core::{list_png_frames, FolderOutcome, JobOutcome, RunResult, RunState};

use super::encoder::run_encoder;

/// Concurrent encoder processes for multi-folder runs.
///
/// Two keeps the encoder from starving the machine while still overlapping
/// work; single-folder runs always use exactly one worker.
pub const DEFAULT_WORKERS: usize = 2;

/// Errors detected before any job is launched.
///
/// Each aborts the entire run with zero side effects and is surfaced to
/// the user as a single message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("img2webp not found:\n{0}")]
    EncoderMissing(String),
    #[error("FPS must be a positive integer")]
    InvalidFps,
    #[error("Please select at least one folder.")]
    NoFolders,
    #[error("Please specify an output file.")]
    MissingOutputFile,
    #[error("Please select an output folder for multi-folder mode.")]
    InvalidOutputDir,
}

/// Caller-supplied parameters for one conversion run
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Ordered snapshot of the source folders
    pub folders: Vec<PathBuf>,
    /// FPS as entered by the user; validated here
    pub fps: String,
    /// Quality 0-100; 100 selects lossless mode
    pub quality: u8,
    /// Per-folder loop flags; paths missing from the map default to looping
    pub loops: HashMap<PathBuf, bool>,
    /// Output file (single folder) or existing directory (multi-folder)
    pub output: PathBuf,
    /// Worker pool bound for multi-folder runs
    pub workers: usize,
}

/// One folder's share of a planned run
#[derive(Debug, Clone)]
struct FolderJob {
    /// 1-based submission index, used in failure reporting
    index: usize,
    folder: PathBuf,
    output: PathBuf,
    loop_forever: bool,
}

/// A validated run, ready to execute
#[derive(Debug)]
pub struct RunPlan {
    encoder: PathBuf,
    delay_ms: u32,
    quality: u8,
    workers: usize,
    jobs: Vec<FolderJob>,
}

impl RunPlan {
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

/// Check every precondition and lay out the per-folder jobs.
///
/// `encoder` is the resolved img2webp path; passing it in (rather than
/// resolving here) keeps planning testable against a stand-in binary.
pub fn plan_run(encoder: PathBuf, request: &RunRequest) -> Result<RunPlan, PreconditionError> {
    if !encoder.is_file() {
        return Err(PreconditionError::EncoderMissing(
            encoder.to_string_lossy().into_owned(),
        ));
    }

    let fps: u32 = request
        .fps
        .trim()
        .parse()
        .map_err(|_| PreconditionError::InvalidFps)?;
    if fps == 0 {
        return Err(PreconditionError::InvalidFps);
    }
    let delay_ms = 1000 / fps;

    if request.folders.is_empty() {
        return Err(PreconditionError::NoFolders);
    }

    let multi = request.folders.len() > 1;
    if multi {
        if request.output.as_os_str().is_empty() || !request.output.is_dir() {
            return Err(PreconditionError::InvalidOutputDir);
        }
    } else if request.output.as_os_str().is_empty() {
        return Err(PreconditionError::MissingOutputFile);
    }

    let jobs = request
        .folders
        .iter()
        .enumerate()
        .map(|(i, folder)| {
            let output = if multi {
                request.output.join(format!("{}.webp", folder_base_name(folder)))
            } else {
                request.output.clone()
            };
            FolderJob {
                index: i + 1,
                folder: folder.clone(),
                output,
                loop_forever: request.loops.get(folder).copied().unwrap_or(true),
            }
        })
        .collect();

    Ok(RunPlan {
        encoder,
        delay_ms,
        quality: request.quality,
        workers: request.workers.max(1),
        jobs,
    })
}

fn folder_base_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

/// Execute a planned run against shared run state.
///
/// Jobs flow through a semaphore-bounded pool (exactly one worker for a
/// single-folder run). Frames are enumerated inside the worker, at
/// conversion time. Once cancellation is requested, jobs that have not
/// started yet record `Failed` without touching the encoder, while
/// in-flight encodes are terminated by their own poll loops; the run
/// still waits for every dispatched job before returning.
///
/// `on_job_complete` fires on a worker after each job returns and must
/// not touch UI state directly.
pub async fn run_batch<F>(plan: RunPlan, state: RunState, on_job_complete: F) -> RunResult
where
    F: Fn() + Send + Sync + 'static,
{
    let workers = if plan.jobs.len() == 1 { 1 } else { plan.workers };
    let semaphore = Arc::new(Semaphore::new(workers));
    let on_complete = Arc::new(on_job_complete);
    let encoder = Arc::new(plan.encoder);
    let cancel = state.cancel_flag();

    log::info!(
        "Starting conversion run: {} folders with {} workers",
        plan.jobs.len(),
        workers
    );

    let mut futures = FuturesUnordered::new();

    for job in plan.jobs {
        let permit = semaphore.clone().acquire_owned().await.unwrap();
        let encoder = encoder.clone();
        let cancel = cancel.clone();
        let state = state.clone();
        let on_complete = on_complete.clone();
        let delay_ms = plan.delay_ms;
        let quality = plan.quality;

        futures.push(tokio::spawn(async move {
            let outcome = if cancel.load(Ordering::SeqCst) {
                // Not-yet-started job observing cancellation
                JobOutcome::Failed
            } else {
                let frames = list_png_frames(&job.folder);
                if frames.is_empty() {
                    log::warn!("No PNGs in {}", job.folder.display());
                    JobOutcome::NoFrames
                } else {
                    run_encoder(
                        &encoder,
                        &job.folder,
                        &frames,
                        delay_ms,
                        quality,
                        job.loop_forever,
                        &job.output,
                        &cancel,
                    )
                    .await
                }
            };

            log::info!(
                "Finished folder {} ({}): {}",
                job.index,
                job.folder.display(),
                outcome.reason_text()
            );

            state.push_outcome(FolderOutcome {
                index: job.index,
                folder: job.folder,
                outcome,
            });
            on_complete();
            drop(permit);
        }));
    }

    // Wait for all dispatched jobs, even after cancellation
    while futures.next().await.is_some() {}

    let result = classify(&state);
    match &result {
        RunResult::Cancelled => state.complete_cancelled(),
        other => state.complete(other.clone()),
    }
    result
}

/// Classify a finished run from its recorded outcomes
fn classify(state: &RunState) -> RunResult {
    if state.is_cancelled() {
        return RunResult::Cancelled;
    }

    let failures: Vec<FolderOutcome> = state
        .outcomes()
        .into_iter()
        .filter(|o| o.outcome != JobOutcome::Success)
        .collect();

    if failures.is_empty() {
        RunResult::Success
    } else {
        RunResult::PartialFailure(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::create_frames_folder;
    use tempfile::TempDir;

    fn request(folders: Vec<PathBuf>, output: PathBuf) -> RunRequest {
        RunRequest {
            folders,
            fps: "25".to_string(),
            quality: 100,
            loops: HashMap::new(),
            output,
            workers: DEFAULT_WORKERS,
        }
    }

    /// A file that stands in for the encoder binary during planning tests
    fn stub_encoder(dir: &Path) -> PathBuf {
        let path = dir.join("img2webp");
        std::fs::write(&path, b"#!/bin/sh\n").unwrap();
        path
    }

    #[test]
    fn test_plan_rejects_missing_encoder() {
        let dir = TempDir::new().unwrap();
        let req = request(vec![dir.path().to_path_buf()], dir.path().join("o.webp"));
        let err = plan_run(PathBuf::from("/nonexistent/img2webp"), &req).unwrap_err();
        assert!(matches!(err, PreconditionError::EncoderMissing(_)));
    }

    #[test]
    fn test_plan_rejects_bad_fps() {
        let dir = TempDir::new().unwrap();
        let encoder = stub_encoder(dir.path());
        for fps in ["0", "-3", "abc", "", "2.5"] {
            let mut req = request(vec![dir.path().to_path_buf()], dir.path().join("o.webp"));
            req.fps = fps.to_string();
            assert_eq!(
                plan_run(encoder.clone(), &req).unwrap_err(),
                PreconditionError::InvalidFps,
                "fps {:?} should be rejected",
                fps
            );
        }
    }

    #[test]
    fn test_plan_delay_truncates() {
        let dir = TempDir::new().unwrap();
        let encoder = stub_encoder(dir.path());
        for (fps, delay) in [("25", 40), ("30", 33), ("60", 16), ("1", 1000)] {
            let mut req = request(vec![dir.path().to_path_buf()], dir.path().join("o.webp"));
            req.fps = fps.to_string();
            let plan = plan_run(encoder.clone(), &req).unwrap();
            assert_eq!(plan.delay_ms, delay, "fps {}", fps);
        }
    }

    #[test]
    fn test_plan_rejects_empty_folder_set() {
        let dir = TempDir::new().unwrap();
        let encoder = stub_encoder(dir.path());
        let req = request(vec![], dir.path().join("o.webp"));
        assert_eq!(
            plan_run(encoder, &req).unwrap_err(),
            PreconditionError::NoFolders
        );
    }

    #[test]
    fn test_plan_single_folder_needs_output_file() {
        let dir = TempDir::new().unwrap();
        let encoder = stub_encoder(dir.path());
        let req = request(vec![dir.path().to_path_buf()], PathBuf::new());
        assert_eq!(
            plan_run(encoder, &req).unwrap_err(),
            PreconditionError::MissingOutputFile
        );
    }

    #[test]
    fn test_plan_multi_folder_needs_existing_dir() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let encoder = stub_encoder(a.path());

        let req = request(
            vec![a.path().to_path_buf(), b.path().to_path_buf()],
            PathBuf::from("/nonexistent/output/dir"),
        );
        assert_eq!(
            plan_run(encoder.clone(), &req).unwrap_err(),
            PreconditionError::InvalidOutputDir
        );

        let out = TempDir::new().unwrap();
        let req = request(
            vec![a.path().to_path_buf(), b.path().to_path_buf()],
            out.path().to_path_buf(),
        );
        let plan = plan_run(encoder, &req).unwrap();
        assert_eq!(plan.job_count(), 2);
        // Multi-folder outputs derive from the folder base name
        let file_name = a.path().file_name().unwrap().to_string_lossy();
        assert_eq!(
            plan.jobs[0].output,
            out.path().join(format!("{}.webp", file_name))
        );
    }

    #[test]
    fn test_plan_loop_defaults_to_true_when_unmapped() {
        let dir = TempDir::new().unwrap();
        let encoder = stub_encoder(dir.path());
        let req = request(vec![dir.path().to_path_buf()], dir.path().join("o.webp"));
        let plan = plan_run(encoder, &req).unwrap();
        assert!(plan.jobs[0].loop_forever);
    }

    #[cfg(unix)]
    mod batch_runs {
        use super::*;
        use crate::test_fixtures::fake_encoder;
        use std::sync::atomic::AtomicUsize;

        fn plan_with(
            encoder: PathBuf,
            folders: Vec<PathBuf>,
            output: PathBuf,
            workers: usize,
        ) -> RunPlan {
            let mut req = request(folders, output);
            req.workers = workers;
            plan_run(encoder, &req).unwrap()
        }

        #[tokio::test]
        async fn test_all_success() {
            let root = TempDir::new().unwrap();
            let encoder = fake_encoder(root.path(), "exit 0");
            let folders: Vec<PathBuf> = (0..3)
                .map(|i| create_frames_folder(root.path(), &format!("clip{}", i), 2))
                .collect();
            let out = root.path().join("out");
            std::fs::create_dir(&out).unwrap();

            let state = RunState::new();
            state.reset(3);
            let result = run_batch(
                plan_with(encoder, folders, out, 2),
                state.clone(),
                || {},
            )
            .await;

            assert_eq!(result, RunResult::Success);
            assert_eq!(state.counts(), (3, 3));
            assert_eq!(state.shown_progress(), 100);
        }

        #[tokio::test]
        async fn test_no_frames_folder_reports_partial_failure() {
            let root = TempDir::new().unwrap();
            let encoder = fake_encoder(root.path(), "exit 0");
            let folder1 = create_frames_folder(root.path(), "clip1", 2);
            let folder2 = root.path().join("empty");
            std::fs::create_dir(&folder2).unwrap();
            let folder3 = create_frames_folder(root.path(), "clip3", 2);
            let out = root.path().join("out");
            std::fs::create_dir(&out).unwrap();

            let state = RunState::new();
            state.reset(3);
            let result = run_batch(
                plan_with(encoder, vec![folder1, folder2, folder3], out, 2),
                state.clone(),
                || {},
            )
            .await;

            match result {
                RunResult::PartialFailure(failures) => {
                    assert_eq!(failures.len(), 1);
                    assert_eq!(failures[0].index, 2);
                    assert_eq!(failures[0].outcome, JobOutcome::NoFrames);
                }
                other => panic!("Expected PartialFailure, got {:?}", other),
            }
            // Completion still snaps progress to 100 on partial failure
            assert_eq!(state.shown_progress(), 100);
        }

        #[tokio::test]
        async fn test_failed_job_does_not_abort_others() {
            let root = TempDir::new().unwrap();
            // Encoder fails whenever the output path mentions "bad"
            let encoder = fake_encoder(
                root.path(),
                r#"case "$*" in *bad*) exit 1 ;; *) exit 0 ;; esac"#,
            );
            let good = create_frames_folder(root.path(), "good", 2);
            let bad = create_frames_folder(root.path(), "bad", 2);
            let out = root.path().join("out");
            std::fs::create_dir(&out).unwrap();

            let state = RunState::new();
            state.reset(2);
            let result = run_batch(
                plan_with(encoder, vec![good, bad], out, 2),
                state.clone(),
                || {},
            )
            .await;

            match result {
                RunResult::PartialFailure(failures) => {
                    assert_eq!(failures.len(), 1);
                    assert_eq!(failures[0].index, 2);
                    assert_eq!(failures[0].outcome, JobOutcome::Failed);
                }
                other => panic!("Expected PartialFailure, got {:?}", other),
            }
            let successes = state
                .outcomes()
                .iter()
                .filter(|o| o.outcome == JobOutcome::Success)
                .count();
            assert_eq!(successes, 1);
        }

        #[tokio::test]
        async fn test_pre_cancelled_run_skips_encoder() {
            let root = TempDir::new().unwrap();
            let encoder = fake_encoder(root.path(), "exit 0");
            let folders: Vec<PathBuf> = (0..3)
                .map(|i| create_frames_folder(root.path(), &format!("clip{}", i), 1))
                .collect();
            let out = root.path().join("out");
            std::fs::create_dir(&out).unwrap();

            let state = RunState::new();
            state.reset(3);
            state.request_cancel();

            let completions = Arc::new(AtomicUsize::new(0));
            let counter = completions.clone();
            let result = run_batch(
                plan_with(encoder, folders, out, 2),
                state.clone(),
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                },
            )
            .await;

            assert_eq!(result, RunResult::Cancelled);
            // Every job still returned (as Failed) before the run reported done
            assert_eq!(completions.load(Ordering::SeqCst), 3);
            assert!(state
                .outcomes()
                .iter()
                .all(|o| o.outcome == JobOutcome::Failed));
            assert_eq!(state.shown_progress(), 0);
        }

        #[tokio::test]
        async fn test_cancel_mid_run_waits_for_dispatched_jobs() {
            let root = TempDir::new().unwrap();
            // Every invocation hangs until killed
            let encoder = fake_encoder(root.path(), "sleep 30");
            let folders: Vec<PathBuf> = (0..4)
                .map(|i| create_frames_folder(root.path(), &format!("clip{}", i), 1))
                .collect();
            let out = root.path().join("out");
            std::fs::create_dir(&out).unwrap();

            let state = RunState::new();
            state.reset(4);

            let cancel_state = state.clone();
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                cancel_state.request_cancel();
            });

            let start = std::time::Instant::now();
            let result = run_batch(
                plan_with(encoder, folders, out, 2),
                state.clone(),
                || {},
            )
            .await;

            assert_eq!(result, RunResult::Cancelled);
            assert_eq!(state.counts().0, 4);
            assert!(state
                .outcomes()
                .iter()
                .all(|o| o.outcome != JobOutcome::Success));
            // Finished via termination, not by waiting out the sleeps
            assert!(start.elapsed() < std::time::Duration::from_secs(10));
        }
    }
}
