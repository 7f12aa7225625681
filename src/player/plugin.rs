use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::fall::*;
use super::input::{handle_move_end, handle_move_input, MoveAction, MoveInput};
use super::movement::*;
use super::state::*;
use crate::climb::{ClimbConfig, ClimbConfigError, ClimbMotor, ClimbSystems, ClimbingSkill};
use crate::physics::contact::body_capsule;
use crate::physics::{ContactFlags, GameLayer};

/// Plugin for the player body the climbing motor drives
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EnhancedInputPlugin);

        // Register input context for player
        app.add_input_context::<Player>();

        // Input observers
        app.add_observer(handle_move_input);
        app.add_observer(handle_move_end);

        // Contacts must be fresh before the climbing check reads them
        app.add_systems(FixedUpdate, sense_contacts.before(ClimbSystems));

        app.add_systems(
            FixedUpdate,
            (apply_gravity, track_falls, apply_velocity)
                .chain()
                .after(ClimbSystems),
        );
    }
}

/// Spawns a climbing-capable player body and returns its entity.
///
/// Nothing is spawned when `climb_config` fails validation.
pub fn spawn_player(
    commands: &mut Commands,
    config: PlayerConfig,
    climb_config: ClimbConfig,
    skill: ClimbingSkill,
    position: Vec3,
) -> Result<Entity, ClimbConfigError> {
    let motor = ClimbMotor::try_new(climb_config)?;

    let player = commands
        .spawn((
            Player,
            config,
            PlayerVelocity::default(),
            ContactFlags::default(),
            FallState::default(),
            motor,
            skill,
            // Input state
            MoveInput::default(),
        ))
        .insert((
            // Physics - Dynamic body with locked rotation, let Avian handle collisions
            RigidBody::Dynamic,
            body_capsule(config.radius, config.stand_height),
            CollisionLayers::new(GameLayer::Player, config.world_layer),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            TranslationInterpolation,
            Friction::new(0.0),    // No friction - we handle movement ourselves
            Restitution::new(0.0), // No bounce
            GravityScale(0.0),     // Gravity comes from the fall systems
        ))
        .insert((
            // Transform
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .insert(
            // Input bindings
            actions!(Player[
                (
                    Action::<MoveAction>::new(),
                    bindings![
                        (KeyCode::KeyW, SwizzleAxis::YXZ),
                        (KeyCode::KeyS, SwizzleAxis::YXZ, Negate::all()),
                        KeyCode::KeyD,
                        (KeyCode::KeyA, Negate::all()),
                    ],
                ),
            ]),
        )
        .id();

    Ok(player)
}
