pub mod climb;
pub mod physics;
pub mod player;

pub use climb::ClimbPlugin;
pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;

use bevy::prelude::*;

/// Unified plugin that adds physics, the player body, and climbing systems.
pub struct BevyClimbingPlugin;

impl Plugin for BevyClimbingPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PhysicsPlugin>() {
            app.add_plugins(PhysicsPlugin);
        }
        if !app.is_plugin_added::<PlayerPlugin>() {
            app.add_plugins(PlayerPlugin);
        }
        if !app.is_plugin_added::<ClimbPlugin>() {
            app.add_plugins(ClimbPlugin);
        }
    }
}

pub mod prelude {
    pub use crate::climb::{
        ClimbConfig, ClimbConfigError, ClimbMessage, ClimbMotor, ClimbNotice, ClimbPhase,
        ClimbPlugin, ClimbRng, ClimbSystems, ClimbingSkill, EnhancedClimbing,
    };
    pub use crate::physics::{CollisionFlags, ContactFlags, GameLayer, PhysicsPlugin};
    pub use crate::player::{
        spawn_player, Climbing, FallState, Levitating, Player, PlayerConfig, PlayerPlugin,
        PlayerVelocity, Riding, Slipping, WaterLevel,
    };
    pub use crate::BevyClimbingPlugin;
}
