use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::app::resources::{SceneState, ViewerSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePause,
    ToggleEdges,
    ToggleHud,
    Remount,
    ToggleHelp,
    Escape,
}

const BINDINGS: &[(egui::Key, Shortcut)] = &[
    (egui::Key::Space, Shortcut::TogglePause),
    (egui::Key::E, Shortcut::ToggleEdges),
    (egui::Key::H, Shortcut::ToggleHud),
    (egui::Key::R, Shortcut::Remount),
    (egui::Key::Questionmark, Shortcut::ToggleHelp),
    (egui::Key::Escape, Shortcut::Escape),
];

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Handled,
    TogglePause,
    Quit,
}

fn apply(shortcut: Shortcut, settings: &mut ViewerSettings, scene: &mut SceneState) -> Outcome {
    match shortcut {
        Shortcut::TogglePause => return Outcome::TogglePause,
        Shortcut::ToggleEdges => settings.show_edges = !settings.show_edges,
        Shortcut::ToggleHud => settings.show_hud = !settings.show_hud,
        Shortcut::Remount => scene.remount_requested = true,
        Shortcut::ToggleHelp => settings.help_open = !settings.help_open,
        Shortcut::Escape if settings.help_open => settings.help_open = false,
        Shortcut::Escape => return Outcome::Quit,
    }
    Outcome::Handled
}

pub fn handle_shortcuts(
    mut contexts: EguiContexts,
    mut settings: ResMut<ViewerSettings>,
    mut scene: ResMut<SceneState>,
    mut time: ResMut<Time<Virtual>>,
    mut exits: EventWriter<AppExit>,
) {
    let ctx = contexts.ctx_mut();
    if ctx.wants_keyboard_input() {
        return;
    }
    let pressed: Vec<Shortcut> = ctx.input(|i| {
        BINDINGS
            .iter()
            .filter(|(key, _)| i.key_pressed(*key))
            .map(|(_, s)| *s)
            .collect()
    });

    for shortcut in pressed {
        match apply(shortcut, &mut settings, &mut scene) {
            Outcome::Handled => {}
            Outcome::TogglePause => {
                if time.is_paused() {
                    time.unpause();
                } else {
                    time.pause();
                }
                tracing::debug!(paused = time.is_paused(), "animation clock toggled");
            }
            Outcome::Quit => {
                exits.send(AppExit::Success);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::config::ViewerConfig;

    fn fresh() -> (ViewerSettings, SceneState) {
        (
            ViewerSettings::from_config(&ViewerConfig::default()),
            SceneState::default(),
        )
    }

    #[test]
    fn toggles_flip_settings() {
        let (mut settings, mut scene) = fresh();
        let edges = settings.show_edges;
        let hud = settings.show_hud;
        assert_eq!(apply(Shortcut::ToggleEdges, &mut settings, &mut scene), Outcome::Handled);
        assert_eq!(apply(Shortcut::ToggleHud, &mut settings, &mut scene), Outcome::Handled);
        assert_eq!(settings.show_edges, !edges);
        assert_eq!(settings.show_hud, !hud);
    }

    #[test]
    fn remount_is_requested_not_performed() {
        let (mut settings, mut scene) = fresh();
        apply(Shortcut::Remount, &mut settings, &mut scene);
        assert!(scene.remount_requested);
        assert_eq!(scene.instance, 0);
    }

    #[test]
    fn escape_closes_help_before_quitting() {
        let (mut settings, mut scene) = fresh();
        apply(Shortcut::ToggleHelp, &mut settings, &mut scene);
        assert!(settings.help_open);
        assert_eq!(apply(Shortcut::Escape, &mut settings, &mut scene), Outcome::Handled);
        assert!(!settings.help_open);
        assert_eq!(apply(Shortcut::Escape, &mut settings, &mut scene), Outcome::Quit);
    }

    #[test]
    fn pause_is_left_to_the_clock() {
        let (mut settings, mut scene) = fresh();
        assert_eq!(
            apply(Shortcut::TogglePause, &mut settings, &mut scene),
            Outcome::TogglePause
        );
    }
}
