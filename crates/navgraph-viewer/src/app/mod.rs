use bevy::prelude::*;

use crate::app::resources::{DecorState, SceneState, ViewerCfg, ViewerSettings};
use crate::util::config;

pub mod boundary;
pub mod resources;

pub struct NavGraphViewerPlugin;

impl Plugin for NavGraphViewerPlugin {
    fn build(&self, app: &mut App) {
        let cfg = config::load_or_default();
        app.insert_resource(ViewerSettings::from_config(&cfg))
            .insert_resource(DecorState::new(&cfg))
            .insert_resource(SceneState::default())
            .insert_resource(ViewerCfg(cfg))
            .add_systems(
                Startup,
                (crate::render::setup_scene, crate::graph::mount_backdrop).chain(),
            )
            .add_systems(
                Update,
                (
                    crate::ui::handle_shortcuts,
                    crate::graph::apply_remount,
                    crate::graph::advance_backdrop,
                    crate::render::sync_graph,
                    crate::render::pose_graph,
                    crate::render::draw_graph_edges,
                    crate::render::spawn_decor,
                    crate::render::animate_decor,
                    crate::render::hover_detection,
                    crate::ui::sync_cursor_visibility,
                    crate::ui::rain_overlay,
                    crate::ui::hud_overlay,
                    crate::ui::help_overlay,
                    crate::ui::cursor_overlay,
                )
                    .chain(),
            )
            .add_systems(Last, crate::graph::teardown_on_exit);
    }
}
