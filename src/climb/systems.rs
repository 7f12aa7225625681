use avian3d::prelude::*;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::messages::ClimbMessage;
use super::motor::{ClimbFrame, ClimbHost, ClimbMotor};
use super::skill::{ClimbingSkill, EnhancedClimbing, SkillHandle};
use crate::physics::{AgentBody, ContactFlags, KinematicMover, SpatialProbe};
use crate::player::fall::{FallHandle, FallState};
use crate::player::movement::horizontal_facing;
use crate::player::{
    Climbing, Levitating, MoveInput, Player, PlayerConfig, Riding, Slipping, WaterLevel,
};

/// Dice shared by every climber
#[derive(Resource)]
pub struct ClimbRng(pub ChaCha8Rng);

impl ClimbRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for ClimbRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

/// Runs the climbing motor of every player once per fixed step
pub fn climbing_check(
    spatial_query: SpatialQuery,
    mut query: Query<
        (
            Entity,
            &mut ClimbMotor,
            &mut Transform,
            &PlayerConfig,
            &MoveInput,
            &mut ContactFlags,
            &mut ClimbingSkill,
            &mut FallState,
            Has<Levitating>,
            Has<Riding>,
            Has<EnhancedClimbing>,
        ),
        With<Player>,
    >,
    water: Res<WaterLevel>,
    gravity: Res<Gravity>,
    mut rng: ResMut<ClimbRng>,
    mut writer: MessageWriter<ClimbMessage>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    let now = time.elapsed();

    for (
        entity,
        mut motor,
        mut transform,
        config,
        move_input,
        mut contacts,
        mut skill,
        mut fall,
        levitating,
        riding,
        enhanced,
    ) in &mut query
    {
        let frame = ClimbFrame {
            delta: dt,
            now,
            forward_held: move_input.forward_held(),
            contacts: contacts.0,
            levitating,
            mounted: riding,
            water_surface: water.0,
            body: AgentBody {
                position: transform.translation,
                facing: horizontal_facing(&transform),
                radius: config.radius,
                height: config.stand_height,
                speed: config.walk_speed,
            },
        };

        let probe = SpatialProbe::new(&spatial_query, config.world_layer);
        let mut skill_handle = SkillHandle {
            skill: &mut *skill,
            enhanced,
        };
        let mut mover = KinematicMover::new(
            &spatial_query,
            &mut *transform,
            config.radius,
            config.stand_height,
            config.world_layer,
        );
        let mut fall_handle = FallHandle {
            state: &mut *fall,
            gravity: gravity.0,
            terminal_speed: config.terminal_speed,
            height: frame.body.position.y,
        };
        let mut notices = Vec::new();

        let mut host = ClimbHost {
            probe: &probe,
            skill: &mut skill_handle,
            integrator: &mut mover,
            fall: &mut fall_handle,
            notices: &mut notices,
            dice: &mut rng.0,
        };

        if let Some(command) = motor.evaluate(&frame, &mut host) {
            contacts.0 = command.contacts;
        }

        writer.write_batch(notices.into_iter().map(|notice| ClimbMessage { entity, notice }));
    }
}

/// Mirrors the motor state into `Climbing` / `Slipping` markers for other systems to filter on
pub fn sync_climb_markers(
    mut commands: Commands,
    query: Query<(Entity, &ClimbMotor, Has<Climbing>, Has<Slipping>)>,
) {
    for (entity, motor, has_climbing, has_slipping) in &query {
        match (motor.is_climbing(), has_climbing) {
            (true, false) => {
                commands.entity(entity).insert(Climbing);
            }
            (false, true) => {
                commands.entity(entity).remove::<Climbing>();
            }
            _ => {}
        }

        let slipping = motor.is_climbing() && motor.is_slipping();
        match (slipping, has_slipping) {
            (true, false) => {
                commands.entity(entity).insert(Slipping);
            }
            (false, true) => {
                commands.entity(entity).remove::<Slipping>();
            }
            _ => {}
        }
    }
}
