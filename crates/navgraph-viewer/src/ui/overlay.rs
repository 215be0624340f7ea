use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts};
use navgraph_core::decor::rain::{CELL_PX, TRAIL_LEN};

use crate::app::resources::{DecorState, ViewerSettings};

const RAIN_HEAD_ALPHA: f32 = 0.35;
const DOT_RADIUS: f32 = 4.0;
const RING_RADIUS: f32 = 16.0;

/// The custom cursor replaces the OS one while it is drawn.
pub fn sync_cursor_visibility(
    settings: Res<ViewerSettings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    let want = !settings.show_cursor;
    if window.cursor.visible != want {
        window.cursor.visible = want;
    }
}

fn trail_alpha(k: usize) -> u8 {
    let fade = 1.0 - k as f32 / TRAIL_LEN as f32;
    (RAIN_HEAD_ALPHA * fade * 255.0).round() as u8
}

pub fn rain_overlay(
    mut contexts: EguiContexts,
    settings: Res<ViewerSettings>,
    mut decor: ResMut<DecorState>,
) {
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();
    decor.rain.resize(screen.width(), screen.height());
    if !settings.show_rain {
        return;
    }

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("rain"),
    ));
    let font = egui::FontId::monospace(CELL_PX * 0.8);
    for (col, column) in decor.rain.columns().iter().enumerate() {
        let x = screen.min.x + col as f32 * CELL_PX;
        for (k, glyph) in column.trail.iter().enumerate() {
            let Some(row) = column.drop.checked_sub(k as u32) else {
                break;
            };
            let y = screen.min.y + row as f32 * CELL_PX;
            if y > screen.max.y {
                continue;
            }
            painter.text(
                egui::pos2(x, y),
                egui::Align2::LEFT_TOP,
                glyph,
                font.clone(),
                egui::Color32::from_rgba_unmultiplied(0, 255, 70, trail_alpha(k)),
            );
        }
    }
}

pub fn cursor_overlay(
    mut contexts: EguiContexts,
    settings: Res<ViewerSettings>,
    decor: Res<DecorState>,
) {
    if !settings.show_cursor {
        return;
    }
    let ctx = contexts.ctx_mut();
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Tooltip,
        egui::Id::new("cursor"),
    ));

    let ring = &decor.cursor.ring;
    painter.circle_stroke(
        egui::pos2(ring.pos.x, ring.pos.y),
        RING_RADIUS * ring.scale,
        egui::Stroke::new(1.5, egui::Color32::from_rgb(0xff, 0x00, 0xea)),
    );
    let dot = &decor.cursor.dot;
    painter.circle_filled(
        egui::pos2(dot.pos.x, dot.pos.y),
        DOT_RADIUS * dot.scale,
        egui::Color32::from_rgb(0x00, 0xf2, 0xff),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_fades_from_the_head() {
        assert!(trail_alpha(0) > trail_alpha(1));
        assert!(trail_alpha(TRAIL_LEN / 2) > trail_alpha(TRAIL_LEN - 1));
        assert_eq!(trail_alpha(TRAIL_LEN), 0);
    }
}
