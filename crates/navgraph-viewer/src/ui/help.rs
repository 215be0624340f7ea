use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::app::resources::ViewerSettings;

pub const SHORTCUTS: &[(&str, &str)] = &[
    ("Space", "Pause / resume the animation"),
    ("E", "Toggle graph edges"),
    ("H", "Toggle the HUD"),
    ("R", "Remount the backdrop"),
    ("?", "Toggle help"),
    ("Esc", "Close help / quit"),
];

pub fn help_overlay(mut contexts: EguiContexts, settings: Res<ViewerSettings>) {
    if !settings.help_open {
        return;
    }

    egui::Window::new("Help / Shortcuts")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(contexts.ctx_mut(), |ui| {
            egui::Grid::new("shortcuts").show(ui, |ui| {
                for (key, what) in SHORTCUTS {
                    ui.strong(*key);
                    ui.label(*what);
                    ui.end_row();
                }
            });
        });
}
