//! Webpify - GPUI Application
//!
//! A native desktop application for converting folders of PNG frames
//! into animated WebP files via the bundled img2webp encoder.

mod actions;
mod convert;
mod core;
mod logging;
#[cfg(test)]
mod test_fixtures;
mod ui;

use gpui::{
    App, AppContext, Application, Bounds, KeyBinding, Menu, MenuItem, WindowBounds, WindowHandle,
    WindowOptions, px, size,
};

use actions::{About, AddFolders, CancelConversion, ClearFolders, Convert, Quit};
use ui::components::{AboutBox, ConverterApp};

/// Build the application menus
fn build_menus() -> Vec<Menu> {
    vec![
        Menu {
            name: "Webpify".into(),
            items: vec![
                MenuItem::action("About Webpify", About),
                MenuItem::separator(),
                MenuItem::action("Quit", Quit),
            ],
        },
        Menu {
            name: "File".into(),
            items: vec![
                MenuItem::action("Add Folder(s)...", AddFolders),
                MenuItem::action("Clear Folders", ClearFolders),
            ],
        },
        Menu {
            name: "Convert".into(),
            items: vec![
                MenuItem::action("Convert", Convert),
                MenuItem::action("Cancel Conversion", CancelConversion),
            ],
        },
    ]
}

fn main() {
    if let Some(log_path) = logging::init_logging() {
        log::info!("Logging to {}", log_path.display());
    }

    // Warn early if the bundled encoder is missing; the run itself
    // re-checks and surfaces the error in a dialog.
    if let Err(e) = convert::verify_encoder() {
        log::warn!("{}", e);
    }

    Application::new().run(|cx: &mut App| {
        // Register global action handlers
        cx.on_action(|_: &Quit, cx| cx.quit());
        cx.on_action(|_: &About, cx| {
            AboutBox::open(cx);
        });

        // Note: folder and conversion action handlers are registered on the
        // ConverterApp view itself via on_action in render(). The view has
        // focus, so it receives the actions dispatched from menu items.

        // Bind keyboard shortcuts
        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("cmd-o", AddFolders, None),
            KeyBinding::new("cmd-backspace", ClearFolders, None),
            KeyBinding::new("cmd-enter", Convert, None),
            KeyBinding::new("escape", CancelConversion, None),
        ]);

        cx.set_menus(build_menus());

        // Open the main window
        let bounds = Bounds::centered(None, size(px(760.), px(560.)), cx);

        let window_handle: WindowHandle<ConverterApp> = cx
            .open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    window_min_size: Some(size(px(560.), px(400.))),
                    titlebar: Some(gpui::TitlebarOptions {
                        title: Some("Webpify".into()),
                        appears_transparent: false,
                        traffic_light_position: None,
                    }),
                    ..Default::default()
                },
                |_window, cx| cx.new(ConverterApp::new),
            )
            .unwrap();

        // Quit the app when the main window is closed
        // This is appropriate for a single-window utility app
        cx.on_window_closed(|cx| {
            cx.quit();
        })
        .detach();

        // window_handle keeps the window alive
        let _ = window_handle;

        cx.activate(true);
    });
}
