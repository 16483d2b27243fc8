//! Rendering implementation for ConverterApp
//!
//! Contains the Render trait implementation and rendering helper methods.

use gpui::{
    Context, ExternalPaths, IntoElement, PromptLevel, Render, SharedString, Window, div,
    prelude::*,
};

use crate::actions::{AddFolders, CancelConversion, ClearFolders, Convert};
use crate::core::RunStage;
use crate::ui::Theme;
use crate::ui::components::folder_card::{FolderCardProps, render_folder_card};
use crate::ui::components::settings_panel::{
    SettingsPanelProps, render_settings_panel, step_fps, step_quality,
};
use crate::ui::components::status_bar::{StatusBarProps, render_status_bar};

use super::ConverterApp;

impl ConverterApp {
    /// Render the empty state drop zone
    pub(super) fn render_empty_state(&self, theme: &Theme) -> impl IntoElement + use<> {
        div()
            .size_full()
            .flex()
            .flex_col()
            .items_center()
            .justify_center()
            .gap_2()
            .text_color(theme.text_muted)
            .child(div().text_2xl().child("📂"))
            .child(div().text_lg().child("Drag & drop folders here"))
            .child(div().text_sm().child("or click Add Folder(s)"))
    }

    /// Render the populated folder card grid
    pub(super) fn render_folder_grid(
        &mut self,
        theme: &Theme,
        cx: &mut Context<Self>,
    ) -> impl IntoElement + use<> {
        let mut grid = div().w_full().flex().flex_wrap().gap_2();

        for (index, folder) in self.folders.iter().cloned().enumerate().collect::<Vec<_>>() {
            let props = FolderCardProps {
                index,
                folder,
                theme: *theme,
            };

            let card = render_folder_card(
                props,
                cx,
                |view: &mut Self, idx| {
                    view.remove_folder(idx);
                },
                |view: &mut Self, idx| {
                    view.toggle_loop(idx);
                },
            );

            grid = grid.child(card);
        }

        grid
    }

    /// Build the status bar from the current run state
    pub(super) fn render_run_status_bar(
        &mut self,
        theme: &Theme,
        cx: &mut Context<Self>,
    ) -> impl IntoElement + use<> {
        let converting = self.run_state.is_converting();
        let (completed, total) = self.run_state.counts();
        let stage_text = if converting {
            ""
        } else {
            match self.run_state.stage() {
                RunStage::Complete => "Done",
                RunStage::Cancelled => "Cancelled",
                RunStage::Converting => "",
            }
        };

        let props = StatusBarProps {
            converting,
            progress: self.run_state.shown_progress(),
            completed,
            total,
            stage_text,
            folder_count: self.folders.len(),
            theme: *theme,
        };

        render_status_bar(
            props,
            cx,
            |view: &mut Self, cx| {
                view.pending_convert_click = true;
                cx.notify();
            },
            |view: &mut Self, _cx| {
                view.cancel_run();
            },
        )
    }

    /// Show any pending error dialog
    pub(super) fn show_pending_error_dialog(
        &mut self,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if let Some((title, message)) = self.pending_error_message.take() {
            let _future = window.prompt(PromptLevel::Warning, &title, Some(&message), &["OK"], cx);
        }
    }

    pub(super) fn show_pending_info_dialog(
        &mut self,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if let Some((title, message)) = self.pending_info_message.take() {
            let _future = window.prompt(PromptLevel::Info, &title, Some(&message), &["OK"], cx);
        }
    }
}

impl Render for ConverterApp {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // Subscribe to appearance changes (once)
        if !self.appearance_subscription_set {
            self.appearance_subscription_set = true;
            cx.observe_window_appearance(window, |_this, _window, cx| {
                cx.notify();
            })
            .detach();
        }

        // Grab initial focus so menu items work immediately
        if self.needs_initial_focus {
            self.needs_initial_focus = false;
            if let Some(ref focus_handle) = self.focus_handle {
                focus_handle.focus(window);
            }
        }

        // Convert clicks are deferred to here because starting a run needs
        // window access for the result dialog
        if self.pending_convert_click {
            self.pending_convert_click = false;
            self.start_run(window, cx);
        }

        // Show any pending dialogs
        self.show_pending_error_dialog(window, cx);
        self.show_pending_info_dialog(window, cx);

        let theme = Theme::from_appearance(window.appearance());
        let is_empty = self.folders.is_empty();
        let converting = self.run_state.is_converting();

        let grid_content = if is_empty {
            self.render_empty_state(&theme).into_any_element()
        } else {
            self.render_folder_grid(&theme, cx).into_any_element()
        };

        // Capture listeners before borrowing for the panels
        let on_external_drop = cx.listener(|this, paths: &ExternalPaths, _window, cx| {
            this.handle_external_drop(paths.paths(), cx);
            cx.notify();
        });
        let on_add_folders = cx.listener(|this, _: &AddFolders, _window, cx| {
            this.prompt_add_folders(cx);
        });
        let on_clear_folders = cx.listener(|this, _: &ClearFolders, _window, cx| {
            this.clear_folders();
            cx.notify();
        });
        let on_convert = cx.listener(|this, _: &Convert, window, cx| {
            this.start_run(window, cx);
        });
        let on_cancel = cx.listener(|this, _: &CancelConversion, _window, cx| {
            this.cancel_run();
            cx.notify();
        });

        let settings_panel = render_settings_panel(
            SettingsPanelProps {
                fps_text: self.fps_text.clone(),
                quality: self.quality,
                output_path: self.output_path.clone(),
                multi_folder: self.folders.len() > 1,
                controls_enabled: !converting,
                theme,
            },
            cx,
            |view: &mut Self, delta| {
                view.fps_text = step_fps(&view.fps_text, delta);
            },
            |view: &mut Self, delta| {
                view.quality = step_quality(view.quality, delta);
            },
            |view: &mut Self, cx| {
                view.prompt_browse_output(cx);
            },
        );

        let status_bar = self.render_run_status_bar(&theme, cx);

        let accent = theme.accent;
        let mut container = div().size_full().flex().flex_col().bg(theme.bg);

        // Track focus if we have a focus handle (not in tests)
        if let Some(ref focus_handle) = self.focus_handle {
            container = container.track_focus(focus_handle);
        }

        container
            .on_action(on_add_folders)
            .on_action(on_clear_folders)
            .on_action(on_convert)
            .on_action(on_cancel)
            // Handle external folder drops anywhere in the window
            .on_drop(on_external_drop)
            .drag_over::<ExternalPaths>(move |style, _, _, _| {
                style.border_2().border_color(accent)
            })
            // Header
            .child(
                div()
                    .px_6()
                    .pt_4()
                    .pb_2()
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .text_lg()
                            .font_weight(gpui::FontWeight::BOLD)
                            .text_color(theme.text)
                            .child("PNG Folders → Animated WebP"),
                    )
                    .child(
                        div()
                            .id(SharedString::from("add-folders-button"))
                            .px_3()
                            .py_1()
                            .text_sm()
                            .bg(theme.bg_card)
                            .text_color(theme.text)
                            .rounded_md()
                            .cursor_pointer()
                            .hover(|s| s.bg(theme.bg_card_hover))
                            .on_click(cx.listener(|this, _event, _window, cx| {
                                this.prompt_add_folders(cx);
                            }))
                            .child("Add Folder(s)"),
                    ),
            )
            // Folder grid (scrollable)
            .child(
                div()
                    .id("folder-grid-scroll")
                    .flex_1()
                    .w_full()
                    .overflow_scroll()
                    .track_scroll(&self.scroll_handle)
                    .px_6()
                    .py_2()
                    .child(grid_content),
            )
            // Settings panel
            .child(div().px_6().py_2().child(settings_panel))
            // Status bar at bottom
            .child(
                div()
                    .px_6()
                    .pb_3()
                    .border_t_1()
                    .border_color(theme.border)
                    .child(status_bar),
            )
    }
}
