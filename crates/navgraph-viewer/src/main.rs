mod app;
mod graph;
mod render;
mod ui;
mod util;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::app::NavGraphViewerPlugin;

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

/// A crash anywhere leaves a logged reason; the process does not try to recover.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(%info, "viewer crashed");
        eprintln!("navgraph viewer hit an unrecoverable error. Restart the viewer to reload.");
        default_hook(info);
    }));
}

fn main() {
    init_tracing();
    install_panic_hook();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting navgraph viewer");

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "navgraph".into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .add_plugins(EguiPlugin)
        .add_plugins(NavGraphViewerPlugin)
        .run();
}
