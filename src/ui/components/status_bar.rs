//! StatusBar component - Progress readout and Convert/Cancel buttons

use gpui::{Context, IntoElement, SharedString, div, prelude::*, px, relative};

use crate::ui::Theme;

/// Properties for the status bar
pub struct StatusBarProps {
    pub converting: bool,
    pub progress: usize,
    pub completed: usize,
    pub total: usize,
    pub stage_text: &'static str,
    pub folder_count: usize,
    pub theme: Theme,
}

/// Render the bottom status bar
///
/// While idle it shows the folder count and a Convert button; during a
/// run it shows the smoothed progress bar, a "Converting (n/m)" label
/// and a Cancel button.
pub fn render_status_bar<
    V: 'static,
    FConvert: Fn(&mut V, &mut Context<V>) + 'static,
    FCancel: Fn(&mut V, &mut Context<V>) + 'static,
>(
    props: StatusBarProps,
    cx: &mut Context<V>,
    on_convert: FConvert,
    on_cancel: FCancel,
) -> impl IntoElement + use<V, FConvert, FCancel> {
    let StatusBarProps {
        converting,
        progress,
        completed,
        total,
        stage_text,
        folder_count,
        theme,
    } = props;

    let status_text = if converting {
        format!("Converting ({}/{})", completed, total)
    } else if folder_count == 1 {
        "1 folder".to_string()
    } else {
        format!("{} folders", folder_count)
    };
    let convert_enabled = !converting && folder_count > 0;
    let fill = (progress.min(100)) as f32 / 100.0;

    div()
        .flex()
        .items_center()
        .gap_3()
        .h(px(44.))
        // Status label
        .child(
            div()
                .text_sm()
                .text_color(theme.text_muted)
                .min_w(px(120.))
                .child(status_text),
        )
        // Progress bar
        .child(
            div()
                .flex_1()
                .h(px(10.))
                .bg(theme.bg_card)
                .border_1()
                .border_color(theme.border)
                .rounded_md()
                .overflow_hidden()
                .child(
                    div()
                        .h_full()
                        .w(relative(fill))
                        .bg(theme.progress_fill)
                        .rounded_md(),
                ),
        )
        // Percent readout
        .child(
            div()
                .text_sm()
                .text_color(theme.text)
                .min_w(px(40.))
                .text_right()
                .child(SharedString::from(format!("{}%", progress.min(100)))),
        )
        // Stage text (Done / Cancelled after a run)
        .child(
            div()
                .text_sm()
                .text_color(theme.text_muted)
                .child(stage_text),
        )
        // Action button
        .child(if converting {
            div()
                .id(SharedString::from("cancel-button"))
                .px_4()
                .py_1()
                .bg(theme.danger)
                .text_color(gpui::white())
                .text_sm()
                .font_weight(gpui::FontWeight::BOLD)
                .rounded_md()
                .cursor_pointer()
                .on_click(cx.listener(move |view, _event, _window, cx| {
                    on_cancel(view, cx);
                }))
                .child("Cancel")
        } else {
            div()
                .id(SharedString::from("convert-button"))
                .px_4()
                .py_1()
                .bg(if convert_enabled {
                    theme.success
                } else {
                    theme.text_muted
                })
                .text_color(gpui::white())
                .text_sm()
                .font_weight(gpui::FontWeight::BOLD)
                .rounded_md()
                .when(convert_enabled, |el| {
                    el.cursor_pointer().hover(|s| s.bg(theme.success_hover))
                })
                .on_click(cx.listener(move |view, _event, _window, cx| {
                    if convert_enabled {
                        on_convert(view, cx);
                    }
                }))
                .child("Convert")
        })
}
