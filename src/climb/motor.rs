use std::time::Duration;

use bevy::prelude::*;

use super::config::{ClimbConfig, ClimbConfigError};
use super::messages::{ClimbNotice, ClimbNotifier};
use super::skill::{skill_check, Dice, SkillModel};
use super::state::{ClimbPhase, ClimbState};
use crate::physics::{AgentBody, CapsuleCast, CollisionFlags, MovementIntegrator, SurfaceProbe};

/// Fall handling owned by the host: climbing hands control over to it while slipping.
pub trait FallHandler {
    /// Mirrors the motor's slipping flag so fall and slip physics agree
    fn set_falling(&mut self, falling: bool);
    /// Starts a fall if one is not already in progress
    fn begin_fall(&mut self);
    fn apply_gravity(&mut self, velocity: &mut Vec3, delta: f32);
}

/// Signals the motor reads for one frame
#[derive(Clone, Copy, Debug)]
pub struct ClimbFrame {
    pub delta: f32,
    /// World clock, only used for bookkeeping
    pub now: Duration,
    pub forward_held: bool,
    /// Collision flags left by the previous move
    pub contacts: CollisionFlags,
    pub levitating: bool,
    pub mounted: bool,
    /// Water surface height at the agent's location, if any
    pub water_surface: Option<f32>,
    pub body: AgentBody,
}

/// Collaborators the motor calls during one evaluation
pub struct ClimbHost<'a> {
    pub probe: &'a dyn SurfaceProbe,
    pub skill: &'a mut dyn SkillModel,
    pub integrator: &'a mut dyn MovementIntegrator,
    pub fall: &'a mut dyn FallHandler,
    pub notices: &'a mut dyn ClimbNotifier,
    pub dice: &'a mut dyn Dice,
}

/// Movement the motor applied this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementCommand {
    pub velocity: Vec3,
    pub displacement: Vec3,
    pub slipping: bool,
    /// Collision flags reported by the integrator, to be read back next frame
    pub contacts: CollisionFlags,
}

/// Wall climbing controller.
///
/// Holding forward against a wall for the commit delay starts a climb. Grip is
/// then tested at regular intervals; a failed test starts a slip, which is
/// retested more often until grip is regained or the agent hits the ground.
#[derive(Component, Clone, Debug, Default)]
pub struct ClimbMotor {
    state: ClimbState,
    config: ClimbConfig,
}

impl ClimbMotor {
    /// Builds a motor without checking `config`; see [`ClimbMotor::try_new`]
    pub fn new(config: ClimbConfig) -> Self {
        Self {
            state: ClimbState::default(),
            config,
        }
    }

    /// Builds a motor from a config that passes [`ClimbConfig::validate`]
    pub fn try_new(config: ClimbConfig) -> Result<Self, ClimbConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn state(&self) -> &ClimbState {
        &self.state
    }

    pub fn config(&self) -> &ClimbConfig {
        &self.config
    }

    pub fn phase(&self) -> ClimbPhase {
        self.state.phase()
    }

    pub fn is_climbing(&self) -> bool {
        self.state.is_climbing
    }

    pub fn is_slipping(&self) -> bool {
        self.state.is_slipping
    }

    /// Whether the current attempt may go on this frame
    pub fn can_continue(&self, frame: &ClimbFrame) -> bool {
        let state = &self.state;
        // Committed climbs move horizontally on purpose, only uncommitted ones can drift
        let drifted = !state.is_climbing
            && frame
                .body
                .horizontal_position()
                .distance(state.last_horizontal_position)
                > self.config.stop_climbing_distance;
        let slipped_to_ground =
            state.is_slipping && frame.contacts.contains(CollisionFlags::BELOW);

        frame.forward_held
            && frame.contacts.contains(CollisionFlags::SIDES)
            && !frame.levitating
            && !frame.mounted
            && !slipped_to_ground
            && !drifted
    }

    /// Advances the motor by one frame.
    ///
    /// Returns the movement applied through the integrator while climbing or slipping.
    pub fn evaluate(
        &mut self,
        frame: &ClimbFrame,
        host: &mut ClimbHost,
    ) -> Option<MovementCommand> {
        if self.can_continue(frame) {
            self.schedule(frame, host);
        } else {
            if self.state.is_climbing {
                host.notices.notify(ClimbNotice::Released);
            }
            self.state.abort(frame.body.horizontal_position(), frame.now);
        }

        if self.state.is_climbing {
            if self.state.ledge_direction.is_none() {
                self.state.ledge_direction = self.find_ledge(&frame.body, host.probe);
            }

            let command = self.climb_movement(frame, host);
            host.fall.set_falling(self.state.is_slipping);
            Some(command)
        } else {
            if !self.state.is_slipping {
                self.state.ledge_direction = None;
            }
            None
        }
    }

    fn schedule(&mut self, frame: &ClimbFrame, host: &mut ClimbHost) {
        let start_delay = self.config.start_delay();
        if self.state.start_timer <= start_delay {
            self.state.start_timer += frame.delta;
        }
        if self.state.start_timer > start_delay && !self.state.is_climbing {
            if !self.state.suppress_start_message {
                host.notices.notify(ClimbNotice::ClimbingMode);
            }
            self.state.suppress_start_message = true;
            self.state.is_climbing = true;
            debug!("climb committed after {:.2}s", self.state.start_timer);
        }

        let was_slipping = self.state.is_slipping;
        let interval = if was_slipping {
            self.config.regain_interval()
        } else {
            self.config.continue_interval()
        };

        self.state.continue_timer += frame.delta;
        if self.state.continue_timer <= interval {
            return;
        }
        self.state.continue_timer = 0.0;

        // Regaining a hold is harder than keeping a good one
        let base_percent = if was_slipping {
            self.config.regain_hold_min_chance
        } else {
            self.config.continue_climb_min_chance
        };
        let submerged = frame
            .water_surface
            .is_some_and(|surface| frame.body.feet_height(self.config.foot_offset) <= surface);

        let check = skill_check(
            &mut *host.skill,
            base_percent,
            &self.config.skill,
            submerged,
            &mut *host.dice,
        );
        debug!(
            roll = check.roll,
            threshold = check.threshold,
            proficiency = check.proficiency,
            water_assisted = check.water_assisted,
            "climbing check {}",
            if check.passed { "passed" } else { "failed" }
        );

        self.state.is_slipping = !check.passed;
        match (was_slipping, self.state.is_slipping) {
            (false, true) => host.notices.notify(ClimbNotice::LostGrip),
            (true, false) => host.notices.notify(ClimbNotice::RegainedGrip),
            _ => {}
        }
    }

    /// Casts the body forward and returns the direction into the wall it hits
    fn find_ledge(&self, body: &AgentBody, probe: &dyn SurfaceProbe) -> Option<Vec3> {
        let cast = CapsuleCast::forward_from(
            body,
            self.config.probe_lower_fraction,
            self.config.probe_distance,
        );
        probe.cast(&cast).map(|hit| -hit.normal)
    }

    fn climb_movement(&mut self, frame: &ClimbFrame, host: &mut ClimbHost) -> MovementCommand {
        if self.state.is_slipping {
            host.fall.begin_fall();
            host.fall.apply_gravity(&mut self.state.velocity, frame.delta);
        } else {
            let boost = if host.skill.is_enhanced() {
                self.config.enhanced_multiplier
            } else {
                1.0
            };
            let ledge = self.state.ledge_direction.unwrap_or(Vec3::ZERO);
            let vertical = self.config.climb_rate * boost;
            self.state.velocity = climb_velocity(ledge, frame.body.speed, vertical);
        }

        let displacement = self.state.velocity * frame.delta;
        let contacts = host.integrator.move_by(displacement);

        MovementCommand {
            velocity: self.state.velocity,
            displacement,
            slipping: self.state.is_slipping,
            contacts,
        }
    }
}

/// Climbing velocity: forward into the ledge at walking speed while rising at `vertical`.
///
/// Pushing forward while rising carries the agent over the top, where losing the
/// wall contact ends the climb on its own.
pub fn climb_velocity(ledge_direction: Vec3, speed: f32, vertical: f32) -> Vec3 {
    let mut velocity = ledge_direction * speed;
    velocity.y = vertical;
    velocity
}
