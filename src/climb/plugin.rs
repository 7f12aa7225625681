use bevy::prelude::*;

use super::messages::{log_climb_messages, ClimbMessage};
use super::systems::{climbing_check, sync_climb_markers, ClimbRng};
use crate::player::WaterLevel;

/// Fixed-step systems that run the climbing motors
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClimbSystems;

/// Plugin for skill-checked wall climbing
pub struct ClimbPlugin;

impl Plugin for ClimbPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ClimbMessage>();
        app.init_resource::<ClimbRng>();
        app.init_resource::<WaterLevel>();

        app.add_systems(
            FixedUpdate,
            (climbing_check, sync_climb_markers)
                .chain()
                .in_set(ClimbSystems),
        );

        app.add_systems(Update, log_climb_messages);
    }
}
