use anyhow::Context;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use navgraph_core::{Backdrop, LifecycleLog};

use crate::app::resources::{SceneState, ViewerCfg};
use crate::util::config::ViewerConfig;

pub fn mount_backdrop(
    mut scene: ResMut<SceneState>,
    cfg: Res<ViewerCfg>,
    windows: Query<(), With<PrimaryWindow>>,
) {
    let has_window = windows.get_single().is_ok();
    mount_into(&mut scene, &cfg.0, has_window);
}

pub fn apply_remount(
    mut scene: ResMut<SceneState>,
    cfg: Res<ViewerCfg>,
    windows: Query<(), With<PrimaryWindow>>,
) {
    if !std::mem::take(&mut scene.remount_requested) {
        return;
    }
    let has_window = windows.get_single().is_ok();
    remount(&mut scene, &cfg.0, has_window);
}

pub fn advance_backdrop(time: Res<Time>, mut scene: ResMut<SceneState>) {
    let t = time.elapsed_seconds();
    scene.view = scene.boundary.live_mut().and_then(|bd| bd.frame(t));
}

pub fn teardown_on_exit(mut exits: EventReader<AppExit>, mut scene: ResMut<SceneState>) {
    if exits.read().next().is_none() {
        return;
    }
    if let Some(bd) = scene.boundary.live_mut() {
        bd.teardown();
    }
    scene.view = None;
}

fn mount_into(scene: &mut SceneState, cfg: &ViewerConfig, has_window: bool) {
    let instance = scene.instance + 1;
    let mounted = scene.boundary.mount(|| {
        cfg.validate().context("invalid viewer config")?;
        if !has_window {
            anyhow::bail!("no primary window to draw into");
        }
        Ok(Backdrop::mount(
            &cfg.graph,
            LifecycleLog::new(cfg.trace_lifecycle, instance),
        ))
    });
    if mounted {
        scene.instance = instance;
        scene.needs_respawn = true;
        scene.view = None;
    }
}

fn remount(scene: &mut SceneState, cfg: &ViewerConfig, has_window: bool) {
    if scene.boundary.is_fallback() {
        tracing::warn!("remount ignored while the graph surface is in fallback");
        return;
    }
    if let Some(mut old) = scene.boundary.take_live() {
        old.teardown();
    }
    mount_into(scene, cfg, has_window);
}
