//! Core application logic and state
//!
//! This module contains:
//! - The source folder collection and per-folder loop flags
//! - PNG frame discovery for source folders
//! - Shared conversion run state (progress, cancellation, outcomes)

mod folders;
mod scanning;
mod state;

pub use folders::{FolderCollection, SourceFolder, DEFAULT_LOOP};
pub use scanning::{is_png_file, list_png_frames};
pub use state::{FolderOutcome, JobOutcome, RunResult, RunStage, RunState};
