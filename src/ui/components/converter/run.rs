//! Conversion run operations for ConverterApp
//!
//! Starts the background batch run, polls its progress on a timer, and
//! reports the final result once every dispatched job has returned.

use std::path::PathBuf;
use std::time::Duration;

use gpui::{AnyWindowHandle, AsyncApp, Context, PromptLevel, Timer, WeakEntity, Window};

use crate::convert::{get_encoder_path, plan_run, run_batch, DEFAULT_WORKERS, RunPlan, RunRequest};
use crate::core::{FolderOutcome, RunResult, RunState};

use super::ConverterApp;

impl ConverterApp {
    /// Validate everything a run needs before any state is touched.
    ///
    /// At most one run is active at a time; a start while one is in
    /// flight is refused, never queued. Every rejection queues its
    /// dialog and returns None with the run state untouched, so no
    /// pre-flight failure can surface as a cancelled run.
    pub(super) fn prepare_run(&mut self) -> Option<(RunPlan, tokio::runtime::Runtime)> {
        if self.run_state.is_converting() {
            log::debug!("Conversion already in progress");
            self.pending_info_message = Some((
                "Conversion Running".to_string(),
                "A conversion is already in progress.".to_string(),
            ));
            return None;
        }

        let encoder = match get_encoder_path() {
            Ok(path) => path,
            Err(e) => {
                log::error!("Encoder lookup failed: {}", e);
                self.pending_error_message = Some(("Encoder Not Found".to_string(), e));
                return None;
            }
        };

        // Snapshot folders and settings; edits during the run don't affect it
        let request = RunRequest {
            folders: self.folders.paths(),
            fps: self.fps_text.clone(),
            quality: self.quality,
            loops: self.folders.loop_map(),
            output: PathBuf::from(self.output_path.trim()),
            workers: DEFAULT_WORKERS,
        };

        let plan = match plan_run(encoder, &request) {
            Ok(plan) => plan,
            Err(e) => {
                log::warn!("Run rejected: {}", e);
                self.pending_error_message =
                    Some(("Cannot Convert".to_string(), e.to_string()));
                return None;
            }
        };

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create tokio runtime: {}", e);
                self.pending_error_message = Some((
                    "Cannot Convert".to_string(),
                    format!("Could not start the conversion runtime: {}", e),
                ));
                return None;
            }
        };

        Some((plan, runtime))
    }

    /// Validate settings and kick off a conversion run
    pub fn start_run(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let Some((plan, runtime)) = self.prepare_run() else {
            cx.notify();
            return;
        };

        log::info!("Starting conversion of {} folder(s)", plan.job_count());
        self.run_state.reset(plan.job_count());

        let state = self.run_state.clone();
        std::thread::spawn(move || {
            runtime.block_on(run_batch(plan, state.clone(), || {}));
            state.finish();
        });

        let window_handle = window.window_handle();
        Self::start_progress_polling(self.run_state.clone(), window_handle, cx);
        cx.notify();
    }

    /// Request cancellation of the active run.
    ///
    /// Running encoders are terminated and queued jobs are skipped; the
    /// run reports Cancelled once every dispatched job has returned.
    pub fn cancel_run(&mut self) {
        if self.run_state.is_converting() {
            log::info!("Cancelling conversion");
            self.run_state.request_cancel();
        }
    }

    /// Start a polling loop that smooths progress and refreshes the UI
    pub(super) fn start_progress_polling(
        state: RunState,
        window_handle: AnyWindowHandle,
        cx: &mut Context<Self>,
    ) {
        cx.spawn(move |_this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut async_cx = cx.clone();
            async move {
                loop {
                    let cx_for_after_await = async_cx.clone();

                    // Wait 50ms between UI updates for smooth progress
                    Timer::after(Duration::from_millis(50)).await;

                    state.tick_progress();

                    if !state.is_converting() {
                        break;
                    }

                    let _ = cx_for_after_await.refresh();
                    async_cx = cx_for_after_await;
                }

                // Final refresh to show completion state
                let _ = async_cx.refresh();

                // Report the result once the run has fully wound down
                let Some(result) = state.take_result() else {
                    return;
                };

                let (level, title, message) = match result {
                    RunResult::Success => {
                        let (completed, _) = state.counts();
                        (
                            PromptLevel::Info,
                            "Conversion Complete",
                            format!(
                                "All {} folder(s) were converted successfully.",
                                completed
                            ),
                        )
                    }
                    RunResult::PartialFailure(failures) => (
                        PromptLevel::Warning,
                        "Conversion Finished",
                        format!(
                            "Some folders could not be converted:\n\n{}",
                            format_failures(&failures)
                        ),
                    ),
                    // Cancelled runs just show the Cancelled stage text
                    RunResult::Cancelled => return,
                };

                use gpui::AppContext;
                if let Ok(prompt_future) = async_cx.update_window(window_handle, |_, window, cx| {
                    window.prompt(level, title, Some(&message), &["OK"], cx)
                }) {
                    let _ = prompt_future.await;
                }
            }
        })
        .detach();
    }
}

/// One line per failed folder, in completion order
fn format_failures(failures: &[FolderOutcome]) -> String {
    failures
        .iter()
        .map(|f| format!("({}) {}", f.index, f.outcome.reason_text()))
        .collect::<Vec<_>>()
        .join("\n")
}
