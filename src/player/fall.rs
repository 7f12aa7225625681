use avian3d::prelude::*;
use bevy::prelude::*;

use super::state::*;
use crate::climb::FallHandler;
use crate::physics::{CollisionFlags, ContactFlags};

/// Tracks the fall the player is currently in
#[derive(Component, Default, Debug)]
pub struct FallState {
    pub falling: bool,
    /// Height the fall started from
    pub start_height: f32,
    /// Seconds spent falling
    pub duration: f32,
}

/// [`FallHandler`] view over a player's fall state for one system run
pub struct FallHandle<'a> {
    pub state: &'a mut FallState,
    pub gravity: Vec3,
    pub terminal_speed: f32,
    /// Current body height, recorded when a fall starts
    pub height: f32,
}

impl FallHandler for FallHandle<'_> {
    fn set_falling(&mut self, falling: bool) {
        self.state.falling = falling;
    }

    fn begin_fall(&mut self) {
        if !self.state.falling {
            self.state.falling = true;
            self.state.start_height = self.height;
            self.state.duration = 0.0;
        }
    }

    fn apply_gravity(&mut self, velocity: &mut Vec3, delta: f32) {
        accelerate_fall(velocity, self.gravity, self.terminal_speed, delta);
    }
}

/// Adds gravity to `velocity`, never letting it drop faster than `terminal_speed`
pub fn accelerate_fall(velocity: &mut Vec3, gravity: Vec3, terminal_speed: f32, delta: f32) {
    *velocity += gravity * delta;
    velocity.y = velocity.y.max(-terminal_speed);
}

/// Applies gravity when not grounded
pub fn apply_gravity(
    mut query: Query<(&mut PlayerVelocity, &PlayerConfig, &ContactFlags), Without<Climbing>>,
    gravity: Res<Gravity>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (mut velocity, config, contacts) in &mut query {
        if contacts.contains(CollisionFlags::BELOW) {
            // Reset vertical velocity when grounded (so gravity doesn't accumulate)
            if velocity.y < 0.0 {
                velocity.y = 0.0;
            }
            continue;
        }

        accelerate_fall(&mut velocity.0, gravity.0, config.terminal_speed, dt);
    }
}

/// Starts falls when the player leaves the ground and ends them on landing
pub fn track_falls(
    mut query: Query<(Entity, &Transform, &ContactFlags, &mut FallState), Without<Climbing>>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (entity, transform, contacts, mut fall) in &mut query {
        let height = transform.translation.y;

        if contacts.contains(CollisionFlags::BELOW) {
            if fall.falling {
                debug!(
                    "{entity:?} landed after {:.2}s, dropped {:.2}m",
                    fall.duration,
                    fall.start_height - height
                );
                fall.falling = false;
            }
            continue;
        }

        if fall.falling {
            fall.duration += dt;
        } else {
            fall.falling = true;
            fall.start_height = height;
            fall.duration = 0.0;
        }
    }
}
