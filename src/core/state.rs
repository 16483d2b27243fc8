//! Conversion run state
//!
//! Shared state for one conversion run, cloned between the UI thread and
//! the worker pool. Workers only touch atomics and mutexed collections;
//! the UI polls this state on a timer and never receives direct callbacks
//! from worker threads.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Current stage of a conversion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    /// Jobs are being dispatched and encoded
    Converting,
    /// Run finished (all dispatched jobs returned, not cancelled)
    Complete,
    /// Run was cancelled by the user
    Cancelled,
}

impl RunStage {
    pub fn display_text(&self) -> &'static str {
        match self {
            RunStage::Converting => "Converting...",
            RunStage::Complete => "Done",
            RunStage::Cancelled => "Cancelled",
        }
    }
}

/// Outcome of a single folder job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Encoder exited 0 with no cancellation
    Success,
    /// Encoder failed, was terminated, or the job was skipped after cancel
    Failed,
    /// Folder contained no PNG frames; the encoder was never invoked
    NoFrames,
}

impl JobOutcome {
    pub fn reason_text(&self) -> &'static str {
        match self {
            JobOutcome::Success => "OK",
            JobOutcome::Failed => "Failed",
            JobOutcome::NoFrames => "No PNGs",
        }
    }
}

/// Per-folder result record, collected in completion order
#[derive(Debug, Clone, PartialEq)]
pub struct FolderOutcome {
    /// 1-based position of the folder in the run's submission order
    pub index: usize,
    pub folder: PathBuf,
    pub outcome: JobOutcome,
}

/// Overall classification of a finished run
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    /// Every folder converted successfully
    Success,
    /// At least one folder failed or had no frames; the rest completed.
    /// Carries the non-success outcomes in completion order.
    PartialFailure(Vec<FolderOutcome>),
    /// The user cancelled; dispatched jobs were waited for before reporting
    Cancelled,
}

/// Shared state for one conversion run.
///
/// At most one run is active at a time; `reset` arms the state when a run
/// starts and `finish` disarms it. Cloning shares the underlying Arcs.
#[derive(Clone)]
pub struct RunState {
    /// Whether a run is currently in flight
    is_converting: Arc<AtomicBool>,
    /// Whether cancellation has been requested
    cancel_requested: Arc<AtomicBool>,
    /// Number of jobs that have returned
    completed: Arc<AtomicUsize>,
    /// Total number of jobs in this run
    total: Arc<AtomicUsize>,
    /// Progress target in percent, derived from completed/total
    progress_target: Arc<AtomicUsize>,
    /// Smoothed progress actually shown, stepped toward the target
    progress_shown: Arc<AtomicUsize>,
    /// Current run stage
    stage: Arc<Mutex<RunStage>>,
    /// Per-folder outcomes in completion order
    outcomes: Arc<Mutex<Vec<FolderOutcome>>>,
    /// Final classification, set when the orchestrator returns
    result: Arc<Mutex<Option<RunResult>>>,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            is_converting: Arc::new(AtomicBool::new(false)),
            cancel_requested: Arc::new(AtomicBool::new(false)),
            completed: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(0)),
            progress_target: Arc::new(AtomicUsize::new(0)),
            progress_shown: Arc::new(AtomicUsize::new(0)),
            stage: Arc::new(Mutex::new(RunStage::Converting)),
            outcomes: Arc::new(Mutex::new(Vec::new())),
            result: Arc::new(Mutex::new(None)),
        }
    }

    /// Arm the state for a new run of `total` jobs
    pub fn reset(&self, total: usize) {
        self.is_converting.store(true, Ordering::SeqCst);
        self.cancel_requested.store(false, Ordering::SeqCst);
        self.completed.store(0, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
        // Nudge the bar off zero so a started run is visibly running
        self.progress_target.store(1, Ordering::SeqCst);
        self.progress_shown.store(1, Ordering::SeqCst);
        *self.stage.lock().unwrap() = RunStage::Converting;
        self.outcomes.lock().unwrap().clear();
        *self.result.lock().unwrap() = None;
    }

    /// Mark the run as no longer in flight
    pub fn finish(&self) {
        self.is_converting.store(false, Ordering::SeqCst);
    }

    pub fn is_converting(&self) -> bool {
        self.is_converting.load(Ordering::SeqCst)
    }

    pub fn request_cancel(&self) {
        self.cancel_requested.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_requested.load(Ordering::SeqCst)
    }

    /// Handle to the raw cancellation flag, observed by workers
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel_requested.clone()
    }

    /// Record a finished job and move the progress target
    pub fn push_outcome(&self, outcome: FolderOutcome) {
        self.outcomes.lock().unwrap().push(outcome);
        let completed = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        let total = self.total.load(Ordering::SeqCst).max(1);
        self.progress_target
            .store((completed * 100 / total).min(100), Ordering::SeqCst);
    }

    pub fn outcomes(&self) -> Vec<FolderOutcome> {
        self.outcomes.lock().unwrap().clone()
    }

    /// (completed, total) counters for status text
    pub fn counts(&self) -> (usize, usize) {
        (
            self.completed.load(Ordering::SeqCst),
            self.total.load(Ordering::SeqCst),
        )
    }

    /// Step the shown progress one percent toward the target.
    ///
    /// Called on the UI polling cadence. The shown value never regresses
    /// and never overshoots the target, so increments stay small and
    /// monotone instead of jumping when a job finishes.
    pub fn tick_progress(&self) -> usize {
        let target = self.progress_target.load(Ordering::SeqCst);
        let shown = self.progress_shown.load(Ordering::SeqCst);
        if shown < target {
            self.progress_shown.store(shown + 1, Ordering::SeqCst);
            shown + 1
        } else {
            shown
        }
    }

    pub fn shown_progress(&self) -> usize {
        self.progress_shown.load(Ordering::SeqCst)
    }

    /// Snap progress to exactly 100 and mark the run complete
    pub fn complete(&self, result: RunResult) {
        self.progress_target.store(100, Ordering::SeqCst);
        self.progress_shown.store(100, Ordering::SeqCst);
        *self.stage.lock().unwrap() = RunStage::Complete;
        *self.result.lock().unwrap() = Some(result);
    }

    /// Reset progress to 0 and mark the run cancelled
    pub fn complete_cancelled(&self) {
        self.progress_target.store(0, Ordering::SeqCst);
        self.progress_shown.store(0, Ordering::SeqCst);
        *self.stage.lock().unwrap() = RunStage::Cancelled;
        *self.result.lock().unwrap() = Some(RunResult::Cancelled);
    }

    pub fn stage(&self) -> RunStage {
        *self.stage.lock().unwrap()
    }

    /// Take the final classification (once, after the run finished)
    pub fn take_result(&self) -> Option<RunResult> {
        self.result.lock().unwrap().take()
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
