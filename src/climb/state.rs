use std::time::Duration;

use bevy::prelude::*;

/// Where an agent currently is in a climb attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClimbPhase {
    /// No attempt in progress
    Idle,
    /// Pressing into a wall, waiting for the commit delay
    Attempting,
    /// Committed and holding on
    Climbing,
    /// Committed but losing grip
    Slipping,
}

/// Mutable state of the climbing motor, kept for the agent's whole session
/// and reset in place at every attempt boundary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClimbState {
    pub(crate) is_climbing: bool,
    pub(crate) is_slipping: bool,
    /// Seconds the precondition has held during this attempt
    pub(crate) start_timer: f32,
    /// Seconds since the last grip check
    pub(crate) continue_timer: f32,
    /// (x, z) position sampled while not climbing, used for the drift check
    pub(crate) last_horizontal_position: Vec2,
    /// Direction into the climbed wall, resolved once per attempt
    pub(crate) ledge_direction: Option<Vec3>,
    /// Latched after the climbing-mode notice so it is only sent once per attempt
    pub(crate) suppress_start_message: bool,
    /// Velocity carried between frames so gravity accumulates while slipping
    pub(crate) velocity: Vec3,
    pub(crate) last_check: Duration,
}

impl ClimbState {
    pub fn is_climbing(&self) -> bool {
        self.is_climbing
    }

    pub fn is_slipping(&self) -> bool {
        self.is_slipping
    }

    pub fn start_timer(&self) -> f32 {
        self.start_timer
    }

    pub fn continue_timer(&self) -> f32 {
        self.continue_timer
    }

    pub fn last_horizontal_position(&self) -> Vec2 {
        self.last_horizontal_position
    }

    pub fn ledge_direction(&self) -> Option<Vec3> {
        self.ledge_direction
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// World time of the last abort
    pub fn last_check(&self) -> Duration {
        self.last_check
    }

    pub fn phase(&self) -> ClimbPhase {
        match (self.is_climbing, self.is_slipping) {
            (true, true) => ClimbPhase::Slipping,
            (true, false) => ClimbPhase::Climbing,
            (false, true) => ClimbPhase::Attempting,
            (false, false) if self.start_timer > 0.0 => ClimbPhase::Attempting,
            (false, false) => ClimbPhase::Idle,
        }
    }

    /// Ends the current attempt, whatever the reason.
    ///
    /// Clears both flags, the timers and the ledge, re-arms the climbing-mode
    /// notice and restarts the drift check from `horizontal_position`.
    pub fn abort(&mut self, horizontal_position: Vec2, now: Duration) {
        self.is_climbing = false;
        self.is_slipping = false;
        self.ledge_direction = None;
        self.suppress_start_message = false;
        self.start_timer = 0.0;
        self.continue_timer = 0.0;
        self.velocity = Vec3::ZERO;
        self.last_check = now;
        self.last_horizontal_position = horizontal_position;
    }
}
