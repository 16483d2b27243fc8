//! ConverterApp component - The main application view
//!
//! This is the root view of the application, containing:
//! - Folder card grid with drag-and-drop
//! - Settings panel (FPS, quality, output path)
//! - Status bar with progress and Convert/Cancel buttons

mod folders;
mod render;
mod run;

use gpui::{Context, FocusHandle, ScrollHandle};

use crate::core::{FolderCollection, RunState};

pub(crate) const DEFAULT_FPS_TEXT: &str = "25";
pub(crate) const DEFAULT_QUALITY: u8 = 100;

/// The main converter view
///
/// Handles:
/// - Displaying the folder card grid
/// - External drag-drop from Finder (ExternalPaths)
/// - Conversion settings and output path selection
/// - Starting, monitoring and cancelling conversion runs
pub struct ConverterApp {
    /// The queued source folders with their loop flags
    pub(crate) folders: FolderCollection,
    /// Shared state for the active (or most recent) conversion run
    pub(crate) run_state: RunState,
    /// Output path as shown in the settings panel
    pub(crate) output_path: String,
    /// Whether the user picked the output path explicitly (vs. auto-suggested)
    pub(crate) output_is_custom: bool,
    /// FPS field contents; validated when a run starts
    pub(crate) fps_text: String,
    /// Quality 0-100; 100 selects lossless encoding
    pub(crate) quality: u8,
    /// Whether we've subscribed to appearance changes
    pub(crate) appearance_subscription_set: bool,
    /// Whether we need to grab initial focus (for menu items to work)
    pub(crate) needs_initial_focus: bool,
    /// Focus handle for receiving actions (None in tests)
    pub(crate) focus_handle: Option<FocusHandle>,
    /// Handle for scroll state of the folder grid
    pub(crate) scroll_handle: ScrollHandle,
    /// Queued error dialog, shown from the render loop
    pub(crate) pending_error_message: Option<(String, String)>,
    /// Queued info dialog, shown from the render loop
    pub(crate) pending_info_message: Option<(String, String)>,
    /// Convert button click deferred to the render loop (needs window access)
    pub(crate) pending_convert_click: bool,
}

impl ConverterApp {
    pub fn new(cx: &mut Context<Self>) -> Self {
        Self {
            folders: FolderCollection::new(),
            run_state: RunState::new(),
            output_path: String::new(),
            output_is_custom: false,
            fps_text: DEFAULT_FPS_TEXT.to_string(),
            quality: DEFAULT_QUALITY,
            appearance_subscription_set: false,
            needs_initial_focus: true,
            focus_handle: Some(cx.focus_handle()),
            scroll_handle: ScrollHandle::new(),
            pending_error_message: None,
            pending_info_message: None,
            pending_convert_click: false,
        }
    }

    /// Create a new ConverterApp for testing (without GPUI context)
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        Self {
            folders: FolderCollection::new(),
            run_state: RunState::new(),
            output_path: String::new(),
            output_is_custom: false,
            fps_text: DEFAULT_FPS_TEXT.to_string(),
            quality: DEFAULT_QUALITY,
            appearance_subscription_set: false,
            needs_initial_focus: false,
            focus_handle: None,
            scroll_handle: ScrollHandle::new(),
            pending_error_message: None,
            pending_info_message: None,
            pending_convert_click: false,
        }
    }
}
