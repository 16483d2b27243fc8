//! FolderCard component - A single folder entry in the drop grid

use gpui::{Context, IntoElement, SharedString, div, prelude::*, px};

use crate::core::SourceFolder;
use crate::ui::Theme;

const MAX_NAME_CHARS: usize = 22;
const MAX_PATH_CHARS: usize = 44;

/// Middle-truncate a path for display, keeping the tail readable
fn truncate_path(path: &str) -> String {
    if path.chars().count() <= MAX_PATH_CHARS {
        return path.to_string();
    }
    let head: String = path.chars().take(17).collect();
    let tail: String = path
        .chars()
        .rev()
        .take(24)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("{}…{}", head, tail)
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_CHARS {
        return name.to_string();
    }
    let head: String = name.chars().take(MAX_NAME_CHARS - 2).collect();
    format!("{}…", head)
}

/// Properties for rendering a FolderCard
pub struct FolderCardProps {
    pub index: usize,
    pub folder: SourceFolder,
    pub theme: Theme,
}

/// Renders a single folder card in the grid
///
/// This is a stateless render function rather than a component because
/// the card's state (path, loop flag, index) is owned by the parent view.
pub fn render_folder_card<
    V: 'static,
    FRemove: Fn(&mut V, usize) + 'static,
    FToggle: Fn(&mut V, usize) + 'static,
>(
    props: FolderCardProps,
    cx: &mut Context<V>,
    on_remove: FRemove,
    on_toggle_loop: FToggle,
) -> impl IntoElement + use<V, FRemove, FToggle> {
    let FolderCardProps {
        index,
        folder,
        theme,
    } = props;

    let name = truncate_name(&folder.display_name());
    let path = truncate_path(&folder.path.to_string_lossy());
    let loop_enabled = folder.loop_enabled;
    let loop_color = if loop_enabled {
        theme.accent
    } else {
        theme.text_muted
    };
    let loop_label = if loop_enabled { "➰ Loop" } else { "〰 Loop" };

    div()
        .id(SharedString::from(format!("folder-card-{}", index)))
        .w(px(250.))
        .h(px(65.))
        .flex()
        .items_center()
        .gap_2()
        .px_3()
        .bg(theme.bg_card)
        .rounded_md()
        .hover(|s| s.bg(theme.bg_card_hover))
        // Folder icon
        .child(div().text_xl().child("📁"))
        // Name and path
        .child(
            div()
                .flex_1()
                .flex()
                .flex_col()
                .overflow_hidden()
                .child(
                    div()
                        .text_sm()
                        .font_weight(gpui::FontWeight::BOLD)
                        .text_color(theme.text)
                        .overflow_hidden()
                        .text_ellipsis()
                        .child(name),
                )
                .child(
                    div()
                        .text_xs()
                        .text_color(theme.text_muted)
                        .overflow_hidden()
                        .text_ellipsis()
                        .child(path),
                ),
        )
        // Remove button and loop toggle
        .child(
            div()
                .flex()
                .flex_col()
                .items_end()
                .gap_1()
                .child(
                    div()
                        .id(SharedString::from(format!("remove-folder-{}", index)))
                        .text_sm()
                        .font_weight(gpui::FontWeight::BOLD)
                        .text_color(theme.danger)
                        .cursor_pointer()
                        .on_click(cx.listener(move |view, _event, _window, cx| {
                            on_remove(view, index);
                            cx.notify();
                        }))
                        .child("✕"),
                )
                .child(
                    div()
                        .id(SharedString::from(format!("loop-folder-{}", index)))
                        .text_xs()
                        .font_weight(gpui::FontWeight::BOLD)
                        .text_color(loop_color)
                        .cursor_pointer()
                        .on_click(cx.listener(move |view, _event, _window, cx| {
                            on_toggle_loop(view, index);
                            cx.notify();
                        }))
                        .child(loop_label),
                ),
        )
}
