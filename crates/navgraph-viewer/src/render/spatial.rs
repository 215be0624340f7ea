use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use navgraph_core::NodeStyle;

use crate::app::resources::{DecorState, SceneState, ViewerSettings};

const NODE_RADIUS: f32 = 0.1;
const PULSE_SCALE: f32 = 1.8;
const HOVER_RADIUS_PX: f32 = 16.0;

#[derive(Component)]
pub struct GraphRoot;

#[derive(Component)]
pub struct GraphNode(pub usize);

#[derive(Component)]
pub struct SearchMarker;

#[derive(Component)]
pub struct TargetHalo;

#[derive(Resource)]
pub struct GraphPalette {
    node_mesh: Handle<Mesh>,
    target: Handle<StandardMaterial>,
    visited: Handle<StandardMaterial>,
    levels: [Handle<StandardMaterial>; 3],
}

impl GraphPalette {
    fn new(meshes: &mut Assets<Mesh>, mats: &mut Assets<StandardMaterial>) -> Self {
        let mut unlit = |color: Color| {
            mats.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..default()
            })
        };
        Self {
            node_mesh: meshes.add(Sphere::new(NODE_RADIUS)),
            target: unlit(Color::srgb_u8(0xff, 0x00, 0xea)),
            visited: unlit(Color::srgb_u8(0x00, 0xff, 0xaa)),
            levels: [
                unlit(Color::srgb_u8(0x70, 0x00, 0xff)),
                unlit(Color::srgb_u8(0x00, 0xf2, 0xff)),
                unlit(Color::WHITE),
            ],
        }
    }

    fn material(&self, style: NodeStyle) -> &Handle<StandardMaterial> {
        match style {
            NodeStyle::Target => &self.target,
            NodeStyle::Visited => &self.visited,
            NodeStyle::Level(l) => &self.levels[usize::from(l).min(2)],
        }
    }
}

fn edge_color() -> Color {
    Color::srgba_u8(0x00, 0xf2, 0xff, 51)
}

fn traveled_color() -> Color {
    Color::srgba_u8(0x00, 0xff, 0xaa, 204)
}

fn active_color() -> Color {
    Color::srgb_u8(0xff, 0x00, 0xea)
}

/// Slow tumble of the whole graph group.
pub fn graph_rotation(t: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, (t * 0.03).sin() * 0.1, t * 0.05, 0.0)
}

/// Rebuilds the graph entities after a (re)mount.
pub fn sync_graph(
    mut commands: Commands,
    mut scene: ResMut<SceneState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
    roots: Query<Entity, With<GraphRoot>>,
) {
    if !scene.needs_respawn {
        return;
    }
    scene.needs_respawn = false;

    for e in roots.iter() {
        commands.entity(e).despawn_recursive();
    }
    let Some(bd) = scene.boundary.live() else {
        return;
    };

    let palette = GraphPalette::new(&mut meshes, &mut mats);
    let marker_mesh = meshes.add(Sphere::new(0.15));
    let marker_mat = mats.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    let halo_mesh = meshes.add(Sphere::new(0.3));
    let halo_mat = mats.add(StandardMaterial {
        base_color: Color::srgba_u8(0xff, 0x00, 0xea, 77),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    commands
        .spawn((SpatialBundle::default(), GraphRoot))
        .with_children(|root| {
            for (i, node) in bd.field().iter() {
                root.spawn((
                    PbrBundle {
                        mesh: palette.node_mesh.clone(),
                        material: palette.material(bd.node_style(i)).clone(),
                        transform: Transform::from_translation(node.position),
                        ..default()
                    },
                    GraphNode(i),
                ));
            }

            root.spawn((
                PbrBundle {
                    mesh: marker_mesh,
                    material: marker_mat,
                    ..default()
                },
                SearchMarker,
            ))
            .with_children(|marker| {
                marker.spawn(PointLightBundle {
                    point_light: PointLight {
                        color: Color::srgb_u8(0x00, 0xf2, 0xff),
                        intensity: 40_000.0,
                        range: 5.0,
                        ..default()
                    },
                    ..default()
                });
            });

            root.spawn((
                PbrBundle {
                    mesh: halo_mesh,
                    material: halo_mat,
                    ..default()
                },
                TargetHalo,
            ));
        });

    commands.insert_resource(palette);
}

/// Per-frame pose: group tumble, node colors, pulse size, marker and halo.
#[allow(clippy::type_complexity)]
pub fn pose_graph(
    time: Res<Time>,
    scene: Res<SceneState>,
    palette: Option<Res<GraphPalette>>,
    mut roots: Query<&mut Transform, With<GraphRoot>>,
    mut nodes: Query<
        (&GraphNode, &mut Handle<StandardMaterial>, &mut Transform),
        Without<GraphRoot>,
    >,
    mut marker: Query<&mut Transform, (With<SearchMarker>, Without<GraphRoot>, Without<GraphNode>)>,
    mut halo: Query<
        &mut Transform,
        (
            With<TargetHalo>,
            Without<GraphRoot>,
            Without<GraphNode>,
            Without<SearchMarker>,
        ),
    >,
) {
    let (Some(bd), Some(palette)) = (scene.boundary.live(), palette) else {
        return;
    };

    let rotation = graph_rotation(time.elapsed_seconds());
    for mut tf in roots.iter_mut() {
        tf.rotation = rotation;
    }

    for (node, mut material, mut tf) in nodes.iter_mut() {
        let wanted = palette.material(bd.node_style(node.0));
        if *material != *wanted {
            *material = wanted.clone();
        }
        let scale = if bd.is_pulsing(node.0) { PULSE_SCALE } else { 1.0 };
        tf.scale = Vec3::splat(scale);
    }

    if let (Some(view), Ok(mut tf)) = (scene.view, marker.get_single_mut()) {
        tf.translation = view.marker;
    }
    if let Ok(mut tf) = halo.get_single_mut() {
        let target = bd.search().target();
        if let Some(node) = bd.field().get(target) {
            tf.translation = node.position;
        }
    }
}

pub fn draw_graph_edges(
    time: Res<Time>,
    scene: Res<SceneState>,
    settings: Res<ViewerSettings>,
    mut gizmos: Gizmos,
) {
    let Some(bd) = scene.boundary.live() else {
        return;
    };
    if bd.is_torn_down() {
        return;
    }
    let rotation = graph_rotation(time.elapsed_seconds());
    let world = |i: usize| rotation * bd.field().position(i);

    if settings.show_edges {
        for (a, b) in bd.graph().edges() {
            gizmos.line(world(a), world(b), edge_color());
        }
    }

    for (a, b) in bd.search().traveled_edges() {
        gizmos.line(world(a), world(b), traveled_color());
    }

    if let Some((a, b)) = scene.view.and_then(|v| v.active_edge) {
        gizmos.line(rotation * a, rotation * b, active_color());
    }
}

/// Nearest node under the pointer, in screen space.
pub fn hover_detection(
    windows: Query<&Window, With<PrimaryWindow>>,
    cam_q: Query<(&Camera, &GlobalTransform)>,
    nodes: Query<(&GraphNode, &GlobalTransform)>,
    mut decor: ResMut<DecorState>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        decor.hovered = None;
        return;
    };
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };

    let mut best: Option<(f32, usize)> = None;
    for (node, tf) in nodes.iter() {
        let Some(screen) = camera.world_to_viewport(cam_tf, tf.translation()) else {
            continue;
        };
        let d = screen.distance(cursor);
        if d < HOVER_RADIUS_PX && best.map(|(bd, _)| d < bd).unwrap_or(true) {
            best = Some((d, node.0));
        }
    }
    let hovered = best.map(|(_, i)| i);
    if decor.hovered != hovered {
        decor.hovered = hovered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_starts_at_identity() {
        let q = graph_rotation(0.0);
        assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn rotation_keeps_lengths() {
        let p = Vec3::new(1.0, -2.0, 3.0);
        for t in [1.0, 17.5, 300.0] {
            let r = graph_rotation(t) * p;
            assert!((r.length() - p.length()).abs() < 1e-4);
        }
    }
}
