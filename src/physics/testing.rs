use std::time::Duration;

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use super::{GameLayer, PhysicsPlugin};

/// Headless app with Avian running at the default 64 Hz fixed step, one step per update
pub(crate) fn physics_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        AssetPlugin::default(),
        bevy::mesh::MeshPlugin,
        bevy::scene::ScenePlugin,
        PhysicsPlugin,
    ))
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_micros(
        15_625,
    )));
    app
}

/// Static box on the world layer
pub(crate) fn spawn_block(app: &mut App, center: Vec3, size: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            CollisionLayers::new(GameLayer::World, LayerMask::ALL),
            Transform::from_translation(center),
        ))
        .id()
}

/// Wall whose climbable face is the plane `z = -1`, facing +Z
pub(crate) fn spawn_wall(app: &mut App) -> Entity {
    spawn_block(app, Vec3::new(0.0, 5.0, -1.5), Vec3::new(10.0, 10.0, 1.0))
}

/// Floor whose top is the plane `y = 0`
pub(crate) fn spawn_floor(app: &mut App) -> Entity {
    spawn_block(app, Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 1.0, 20.0))
}

/// Runs a few physics steps so new colliders reach the spatial query pipeline
pub(crate) fn settle(app: &mut App) {
    for _ in 0..3 {
        app.update();
    }
}
