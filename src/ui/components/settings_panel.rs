//! SettingsPanel component - FPS, quality and output path controls

use gpui::{Context, IntoElement, SharedString, div, prelude::*, px};

use crate::ui::Theme;

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 60;
pub const DEFAULT_FPS: u32 = 25;

/// Step the FPS text field by `delta`, clamped to [MIN_FPS, MAX_FPS].
///
/// Unparseable text snaps back to the default before stepping.
pub fn step_fps(current: &str, delta: i32) -> String {
    let value = current.trim().parse::<u32>().unwrap_or(DEFAULT_FPS);
    let stepped = (value as i64 + delta as i64).clamp(MIN_FPS as i64, MAX_FPS as i64);
    stepped.to_string()
}

/// Step the quality by `delta`, clamped to [0, 100]
pub fn step_quality(current: u8, delta: i32) -> u8 {
    (current as i64 + delta as i64).clamp(0, 100) as u8
}

/// Display label for a quality value (100 means lossless encoding)
pub fn quality_label(quality: u8) -> String {
    if quality == 100 {
        "Lossless".to_string()
    } else {
        format!("{}", quality)
    }
}

/// Properties for the settings panel
pub struct SettingsPanelProps {
    pub fps_text: String,
    pub quality: u8,
    pub output_path: String,
    pub multi_folder: bool,
    pub controls_enabled: bool,
    pub theme: Theme,
}

/// Render the settings panel
///
/// Shows FPS and quality steppers plus the output path row with a
/// Browse button. Controls are greyed out while a run is in flight.
pub fn render_settings_panel<
    V: 'static,
    FFps: Fn(&mut V, i32) + Clone + 'static,
    FQuality: Fn(&mut V, i32) + Clone + 'static,
    FBrowse: Fn(&mut V, &mut Context<V>) + 'static,
>(
    props: SettingsPanelProps,
    cx: &mut Context<V>,
    on_fps_step: FFps,
    on_quality_step: FQuality,
    on_browse: FBrowse,
) -> impl IntoElement + use<V, FFps, FQuality, FBrowse> {
    let SettingsPanelProps {
        fps_text,
        quality,
        output_path,
        multi_folder,
        controls_enabled,
        theme,
    } = props;

    let output_shown = if output_path.is_empty() {
        if multi_folder {
            "Choose an output folder…".to_string()
        } else {
            "Choose an output file…".to_string()
        }
    } else {
        output_path
    };
    let output_color = theme.text;
    let browse_label = if multi_folder {
        "Browse Folder…"
    } else {
        "Browse…"
    };

    div()
        .flex()
        .flex_col()
        .gap_2()
        .p_3()
        .bg(theme.bg_card)
        .rounded_md()
        // FPS and quality steppers
        .child(
            div()
                .flex()
                .items_center()
                .gap_4()
                .child(render_stepper(
                    "fps",
                    "FPS",
                    fps_text,
                    controls_enabled,
                    &theme,
                    cx,
                    on_fps_step,
                ))
                .child(render_stepper(
                    "quality",
                    "Quality",
                    quality_label(quality),
                    controls_enabled,
                    &theme,
                    cx,
                    on_quality_step,
                )),
        )
        // Output path row
        .child(
            div()
                .flex()
                .items_center()
                .gap_2()
                .child(
                    div()
                        .text_sm()
                        .text_color(theme.text_muted)
                        .child("Output:"),
                )
                .child(
                    div()
                        .flex_1()
                        .px_2()
                        .py_1()
                        .text_sm()
                        .text_color(output_color)
                        .bg(theme.bg)
                        .border_1()
                        .border_color(theme.border)
                        .rounded_md()
                        .overflow_hidden()
                        .text_ellipsis()
                        .child(output_shown),
                )
                .child(
                    div()
                        .id(SharedString::from("browse-output"))
                        .px_3()
                        .py_1()
                        .text_sm()
                        .bg(theme.bg_card_hover)
                        .text_color(theme.text)
                        .rounded_md()
                        .when(controls_enabled, |el| el.cursor_pointer())
                        .on_click(cx.listener(move |view, _event, _window, cx| {
                            if controls_enabled {
                                on_browse(view, cx);
                            }
                        }))
                        .child(browse_label),
                ),
        )
}

/// A compact -/+ stepper with a value readout between the buttons
fn render_stepper<V: 'static, FStep: Fn(&mut V, i32) + Clone + 'static>(
    id: &'static str,
    label: &'static str,
    value_text: String,
    enabled: bool,
    theme: &Theme,
    cx: &mut Context<V>,
    on_step: FStep,
) -> impl IntoElement + use<V, FStep> {
    let button_color = if enabled { theme.text } else { theme.text_muted };
    let on_step_down = on_step.clone();
    let bg_hover = theme.bg_card_hover;

    div()
        .flex()
        .items_center()
        .gap_1()
        .child(
            div()
                .text_sm()
                .text_color(theme.text_muted)
                .child(label),
        )
        .child(
            div()
                .id(SharedString::from(format!("{}-down", id)))
                .w(px(22.))
                .text_center()
                .text_sm()
                .font_weight(gpui::FontWeight::BOLD)
                .text_color(button_color)
                .rounded_md()
                .when(enabled, |el| el.cursor_pointer().hover(|s| s.bg(bg_hover)))
                .on_click(cx.listener(move |view, _event, _window, cx| {
                    if enabled {
                        on_step_down(view, -1);
                        cx.notify();
                    }
                }))
                .child("−"),
        )
        .child(
            div()
                .min_w(px(56.))
                .text_center()
                .text_sm()
                .text_color(theme.text)
                .child(value_text),
        )
        .child(
            div()
                .id(SharedString::from(format!("{}-up", id)))
                .w(px(22.))
                .text_center()
                .text_sm()
                .font_weight(gpui::FontWeight::BOLD)
                .text_color(button_color)
                .rounded_md()
                .when(enabled, |el| el.cursor_pointer().hover(|s| s.bg(bg_hover)))
                .on_click(cx.listener(move |view, _event, _window, cx| {
                    if enabled {
                        on_step(view, 1);
                        cx.notify();
                    }
                }))
                .child("+"),
        )
}
