use avian3d::prelude::*;
use bevy::prelude::*;

use crate::physics::GameLayer;

/// Marker component for the player entity (also used as input context)
#[derive(Component, Default)]
pub struct Player;

/// Player body configuration
#[derive(Component, Clone, Copy)]
pub struct PlayerConfig {
    /// Walking speed in m/s, also the forward speed while climbing
    pub walk_speed: f32,
    /// Standing collider height
    pub stand_height: f32,
    /// Collider radius
    pub radius: f32,
    /// Fastest downward speed gravity can reach (m/s)
    pub terminal_speed: f32,
    /// How far ahead of the body a wall still counts as side contact
    pub wall_reach: f32,
    /// Layers the body collides with and climbs on
    pub world_layer: LayerMask,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            stand_height: 1.8,
            radius: 0.4,
            terminal_speed: 50.0,
            wall_reach: 0.05,
            world_layer: GameLayer::World.into(),
        }
    }
}

/// Current player velocity
#[derive(Component, Default, Deref, DerefMut)]
pub struct PlayerVelocity(pub Vec3);

/// Marker: player is attached to a wall
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct Climbing;

/// Marker: player is attached to a wall but losing grip
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct Slipping;

/// Marker: player is levitating
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct Levitating;

/// Marker: player is riding a mount
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct Riding;

/// Height of the water surface in the area the player is in, if there is any
#[derive(Resource, Default, Clone, Copy, Debug, Deref, DerefMut)]
pub struct WaterLevel(pub Option<f32>);
