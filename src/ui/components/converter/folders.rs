//! Folder operations for ConverterApp
//!
//! Handles folder addition (picker and drag-drop), removal, loop flags,
//! and the output path suggestion that tracks the folder list.

use std::path::PathBuf;

use gpui::{AsyncApp, Context, PathPromptOptions, WeakEntity};

use super::ConverterApp;

impl ConverterApp {
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Add folders to the queue, skipping non-directories and duplicates
    pub fn add_folder_paths(&mut self, paths: &[PathBuf]) {
        let added = self.folders.add_folders(paths);
        if added < paths.len() {
            log::debug!(
                "Skipped {} dropped item(s) (not directories or already queued)",
                paths.len() - added
            );
        }
        if added > 0 {
            log::info!("Added {} folder(s), {} queued", added, self.folders.len());
            self.refresh_output_suggestion();
        }
    }

    /// Handle external drop from Finder
    pub fn handle_external_drop(&mut self, paths: &[PathBuf], _cx: &mut Context<Self>) {
        if self.run_state.is_converting() {
            log::debug!("Ignoring drop during conversion");
            return;
        }
        self.add_folder_paths(paths);
    }

    /// Show the folder picker and add the chosen folders
    pub fn prompt_add_folders(&mut self, cx: &mut Context<Self>) {
        if self.run_state.is_converting() {
            return;
        }

        let options = PathPromptOptions {
            files: false,
            directories: true,
            multiple: true,
            prompt: None,
        };
        let receiver = cx.prompt_for_paths(options);

        cx.spawn(|this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut async_cx = cx.clone();
            async move {
                if let Ok(Ok(Some(paths))) = receiver.await {
                    let _ = this.update(&mut async_cx, |this, cx| {
                        this.add_folder_paths(&paths);
                        cx.notify();
                    });
                }
            }
        })
        .detach();
    }

    /// Remove the folder at `index`
    pub fn remove_folder(&mut self, index: usize) {
        if self.run_state.is_converting() {
            return;
        }
        self.folders.remove(index);
        self.refresh_output_suggestion();
    }

    /// Clear all queued folders
    pub fn clear_folders(&mut self) {
        if self.run_state.is_converting() {
            return;
        }
        self.folders.clear();
        self.refresh_output_suggestion();
    }

    /// Toggle the loop flag for the folder at `index`
    pub fn toggle_loop(&mut self, index: usize) {
        self.folders.toggle_loop(index);
    }

    /// Update the output path suggestion after the folder list changed.
    ///
    /// A path the user picked explicitly is left alone. Otherwise a single
    /// queued folder suggests `<parent>/<name>.webp`; with several folders
    /// the output must be a directory, so the suggestion is cleared.
    pub(super) fn refresh_output_suggestion(&mut self) {
        if self.output_is_custom {
            return;
        }
        self.output_path = match self.folders.len() {
            1 => {
                let folder = self.folders.get(0).unwrap();
                let name = folder.display_name();
                folder
                    .path
                    .parent()
                    .map(|p| p.join(format!("{}.webp", name)))
                    .unwrap_or_else(|| PathBuf::from(format!("{}.webp", name)))
                    .to_string_lossy()
                    .into_owned()
            }
            _ => String::new(),
        };
    }

    /// Show the output picker appropriate for the current mode.
    ///
    /// Multi-folder runs pick a destination directory; single-folder runs
    /// pick the output file itself.
    pub fn prompt_browse_output(&mut self, cx: &mut Context<Self>) {
        if self.run_state.is_converting() {
            return;
        }

        if self.folders.len() > 1 {
            let options = PathPromptOptions {
                files: false,
                directories: true,
                multiple: false,
                prompt: None,
            };
            let receiver = cx.prompt_for_paths(options);
            cx.spawn(|this: WeakEntity<Self>, cx: &mut AsyncApp| {
                let mut async_cx = cx.clone();
                async move {
                    if let Ok(Ok(Some(paths))) = receiver.await
                        && let Some(path) = paths.first()
                    {
                        let path = path.clone();
                        let _ = this.update(&mut async_cx, |this, cx| {
                            this.output_path = path.to_string_lossy().into_owned();
                            this.output_is_custom = true;
                            cx.notify();
                        });
                    }
                }
            })
            .detach();
        } else {
            let (start_dir, default_filename) = match self.folders.get(0) {
                Some(folder) => {
                    let dir = folder
                        .path
                        .parent()
                        .map(|p| p.to_path_buf())
                        .unwrap_or_else(|| PathBuf::from("."));
                    (dir, format!("{}.webp", folder.display_name()))
                }
                None => {
                    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
                    (dir, "animation.webp".to_string())
                }
            };

            let receiver = cx.prompt_for_new_path(&start_dir, Some(&default_filename));
            cx.spawn(move |this: WeakEntity<Self>, cx: &mut AsyncApp| {
                let mut async_cx = cx.clone();
                async move {
                    if let Ok(Ok(Some(path))) = receiver.await {
                        let _ = this.update(&mut async_cx, |this, cx| {
                            this.output_path = path.to_string_lossy().into_owned();
                            this.output_is_custom = true;
                            cx.notify();
                        });
                    }
                }
            })
            .detach();
        }
    }
}
