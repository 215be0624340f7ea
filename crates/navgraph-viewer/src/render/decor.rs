use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use navgraph_core::decor::Spikes;

use crate::app::resources::{DecorState, SceneState, ViewerSettings};

const STAR_RADIUS: f32 = 0.02;
const SPIKE_RADIUS: f32 = 0.012;
const MIN_SPIKE_SCALE: f32 = 1e-3;

#[derive(Component)]
pub struct StarfieldRoot;

#[derive(Component)]
pub struct SpikesRoot;

#[derive(Component)]
pub struct SpikeGroup(pub usize);

fn spike_colors() -> [Color; 4] {
    [
        Color::srgba_u8(0x00, 0xf2, 0xff, 153),
        Color::srgba_u8(0x70, 0x00, 0xff, 153),
        Color::srgba_u8(0xff, 0x00, 0xea, 153),
        Color::srgba(1.0, 1.0, 1.0, 0.6),
    ]
}

/// Spawns the starfield and the spikes once the graph surface is live.
pub fn spawn_decor(
    mut commands: Commands,
    scene: Res<SceneState>,
    decor: Res<DecorState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
    mut spawned: Local<bool>,
) {
    if *spawned || scene.boundary.live().is_none() {
        return;
    }
    *spawned = true;

    let star_mesh = meshes.add(Sphere::new(STAR_RADIUS));
    let star_mat = mats.add(StandardMaterial {
        base_color: Color::srgba_u8(0x00, 0xf2, 0xff, 204),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands
        .spawn((SpatialBundle::default(), StarfieldRoot))
        .with_children(|root| {
            for p in decor.starfield.points() {
                root.spawn(PbrBundle {
                    mesh: star_mesh.clone(),
                    material: star_mat.clone(),
                    transform: Transform::from_translation(*p),
                    ..default()
                });
            }
        });

    let palette: Vec<(Color, Handle<StandardMaterial>)> = spike_colors()
        .into_iter()
        .map(|c| {
            let mat = mats.add(StandardMaterial {
                base_color: c,
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            });
            (c, mat)
        })
        .collect();

    commands
        .spawn((SpatialBundle::default(), SpikesRoot))
        .with_children(|root| {
            for (i, spike) in decor.spikes.iter().enumerate() {
                let (color, mat) = &palette[spike.palette % palette.len()];
                let mesh = meshes.add(Cylinder::new(SPIKE_RADIUS, spike.length));
                root.spawn((SpatialBundle::default(), SpikeGroup(i)))
                    .with_children(|group| {
                        group.spawn(PbrBundle {
                            mesh,
                            material: mat.clone(),
                            transform: Transform::from_xyz(0.0, spike.length * 0.5, 0.0),
                            ..default()
                        });
                        group.spawn(PointLightBundle {
                            point_light: PointLight {
                                color: color.with_alpha(1.0),
                                intensity: 8_000.0,
                                range: 2.0,
                                ..default()
                            },
                            transform: Transform::from_xyz(0.0, spike.length, 0.0),
                            ..default()
                        });
                    });
            }
        });
}

/// Starfield drift, spike pulse, rain ticks and the cursor springs.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn animate_decor(
    time: Res<Time>,
    real: Res<Time<Real>>,
    settings: Res<ViewerSettings>,
    mut decor: ResMut<DecorState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut stars: Query<(&mut Transform, &mut Visibility), With<StarfieldRoot>>,
    mut spikes_root: Query<&mut Visibility, (With<SpikesRoot>, Without<StarfieldRoot>)>,
    mut groups: Query<
        (&SpikeGroup, &mut Transform, &mut Visibility),
        (Without<StarfieldRoot>, Without<SpikesRoot>),
    >,
) {
    let t = time.elapsed_seconds();
    let decor = &mut *decor;

    decor.starfield.advance(time.delta_seconds());
    let rot = decor.starfield.rotation();
    for (mut tf, mut vis) in stars.iter_mut() {
        tf.rotation = Quat::from_euler(EulerRot::XYZ, rot.x, rot.y, 0.0);
        *vis = shown(settings.show_starfield);
    }

    decor.spikes.update(t, &mut decor.rng);
    let spin = Spikes::spin(t);
    let spin = Quat::from_euler(EulerRot::XYZ, spin.x, spin.y, 0.0);
    for mut vis in spikes_root.iter_mut() {
        *vis = shown(settings.show_spikes);
    }
    let spikes: Vec<_> = decor.spikes.iter().collect();
    for (group, mut tf, mut vis) in groups.iter_mut() {
        let Some(spike) = spikes.get(group.0) else {
            continue;
        };
        tf.rotation = spin * Quat::from_rotation_arc(Vec3::Y, spike.dir);
        tf.scale = Vec3::splat(spike.scale.max(MIN_SPIKE_SCALE));
        *vis = shown(spike.visible);
    }

    let dt = real.delta_seconds();
    if settings.show_rain {
        decor.rain.advance(dt, &mut decor.rng);
    }

    if let Some(pointer) = windows.get_single().ok().and_then(|w| w.cursor_position()) {
        decor.cursor.step(pointer, decor.hovered.is_some(), dt);
    }
}

fn shown(on: bool) -> Visibility {
    if on {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}
