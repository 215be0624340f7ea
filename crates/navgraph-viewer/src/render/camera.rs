use bevy::prelude::*;

pub fn background() -> Color {
    Color::srgb_u8(3, 3, 3)
}

pub fn setup_scene(mut commands: Commands) {
    commands.insert_resource(ClearColor(background()));

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 5000.0,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 20.0, 10.0),
        ..default()
    });

    commands.spawn(Camera3dBundle {
        transform: Transform::from_xyz(0.0, 0.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
}
