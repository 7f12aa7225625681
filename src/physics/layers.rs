use avian3d::prelude::*;

/// Collision layers for the physics simulation
#[derive(PhysicsLayer, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Climbing agents
    Player,
    /// Static world geometry, including anything that can be climbed
    World,
}
