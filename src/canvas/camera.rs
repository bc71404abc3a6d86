use bevy::prelude::*;

#[derive(Component)]
pub struct CanvasCamera;

/// Fixed 2D camera: one world unit per logical pixel, no pan or zoom
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        CanvasCamera,
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}
