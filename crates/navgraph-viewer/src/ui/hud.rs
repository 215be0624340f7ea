use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use navgraph_core::NodeStyle;

use crate::app::resources::{DecorState, SceneState, ViewerSettings};
use crate::ui::tooltips::render_tooltip;
use crate::ui::{HUD_EDGE_PADDING, TITLE_SIZE, TOOLTIP_OFFSET};

const FPS_SMOOTHING: f32 = 0.1;

#[allow(clippy::too_many_arguments)]
pub fn hud_overlay(
    mut contexts: EguiContexts,
    time: Res<Time<Virtual>>,
    real: Res<Time<Real>>,
    scene: Res<SceneState>,
    settings: Res<ViewerSettings>,
    decor: Res<DecorState>,
    mut fps: Local<f32>,
) {
    let dt = real.delta_seconds();
    if dt > 0.0 {
        *fps += (1.0 / dt - *fps) * FPS_SMOOTHING;
    }

    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();
    let now = real.elapsed_seconds();

    egui::Area::new(egui::Id::new("title"))
        .order(egui::Order::Middle)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .interactable(false)
        .show(ctx, |ui| {
            let mut text = decor.title.visible(now).to_string();
            if decor.title.cursor_on(now) {
                text.push('|');
            }
            ui.label(
                egui::RichText::new(text)
                    .size(TITLE_SIZE)
                    .monospace()
                    .color(egui::Color32::WHITE),
            );
        });

    if let Some(reason) = scene.boundary.fallback_reason() {
        egui::Area::new(egui::Id::new("fallback"))
            .order(egui::Order::Foreground)
            .anchor(
                egui::Align2::CENTER_BOTTOM,
                egui::vec2(0.0, -HUD_EDGE_PADDING),
            )
            .show(ctx, |ui| {
                ui.colored_label(
                    egui::Color32::LIGHT_RED,
                    format!("Graph unavailable: {reason}"),
                );
            });
    }

    if !settings.show_hud {
        return;
    }

    egui::Area::new(egui::Id::new("hud"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(
            screen.min.x + HUD_EDGE_PADDING,
            screen.min.y + HUD_EDGE_PADDING,
        ))
        .show(ctx, |ui| {
            ui.group(|ui| {
                ui.label(format!("FPS: {:.0}", *fps));
                if time.is_paused() {
                    ui.label("Paused");
                }
                let Some(bd) = scene.boundary.live() else {
                    return;
                };
                ui.label(format!("Instance: {}", scene.instance));
                if let Some(view) = scene.view {
                    ui.label(format!("Phase: {}", view.phase.as_str()));
                }
                let search = bd.search();
                ui.label(format!(
                    "Current -> target: {} -> {}",
                    search.current(),
                    search.target()
                ));
                ui.label(format!(
                    "Path: {} hops / {} shown / {} visited",
                    search.path().len().saturating_sub(1),
                    search.active_prefix().len(),
                    search.visited().len()
                ));
                ui.label(format!(
                    "Graph: {} nodes / {} edges",
                    bd.graph().len(),
                    bd.graph().edge_count()
                ));
                ui.label(format!("Beats: {}", bd.beat().fired()));
            });
        });

    let (Some(node), Some(bd)) = (decor.hovered, scene.boundary.live()) else {
        return;
    };
    let Some(pointer) = ctx.pointer_hover_pos() else {
        return;
    };
    let role = match bd.node_style(node) {
        NodeStyle::Target => "target".to_string(),
        NodeStyle::Visited => "visited".to_string(),
        NodeStyle::Level(l) => format!("level {l}"),
    };
    render_tooltip(
        ctx,
        "node-tooltip",
        pointer + egui::vec2(TOOLTIP_OFFSET, TOOLTIP_OFFSET),
        [
            format!("Node {node}"),
            role,
            format!("Links: {}", bd.graph().neighbors(node).len()),
        ],
    );
}
