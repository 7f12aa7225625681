//! Test doubles for the climbing collaborators.

use std::cell::Cell;

use bevy::prelude::*;

use super::motor::FallHandler;
use super::skill::{Dice, SkillModel};
use crate::physics::{CapsuleCast, CollisionFlags, MovementIntegrator, SurfaceHit, SurfaceProbe};

pub struct FakeSkill {
    pub value: i32,
    pub uses: u32,
    pub racial: bool,
    pub enhanced: bool,
}

impl FakeSkill {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            uses: 0,
            racial: false,
            enhanced: false,
        }
    }
}

impl SkillModel for FakeSkill {
    fn tally_practice(&mut self, uses: u32) {
        self.uses += uses;
    }

    fn proficiency(&self) -> i32 {
        self.value
    }

    fn has_racial_bonus(&self) -> bool {
        self.racial
    }

    fn is_enhanced(&self) -> bool {
        self.enhanced
    }
}

/// Replays a fixed sequence of rolls, repeating the last one
pub struct LoadedDice {
    rolls: Vec<u32>,
    next: usize,
}

impl LoadedDice {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            next: 0,
        }
    }
}

impl Dice for LoadedDice {
    fn d100(&mut self) -> u32 {
        let roll = self.rolls[self.next.min(self.rolls.len() - 1)];
        self.next += 1;
        roll
    }
}

#[derive(Default)]
pub struct FakeProbe {
    pub hit: Option<SurfaceHit>,
    pub casts: Cell<u32>,
}

impl FakeProbe {
    pub fn wall(normal: Vec3) -> Self {
        Self {
            hit: Some(SurfaceHit {
                normal,
                distance: 0.05,
            }),
            casts: Cell::new(0),
        }
    }
}

impl SurfaceProbe for FakeProbe {
    fn cast(&self, _cast: &CapsuleCast) -> Option<SurfaceHit> {
        self.casts.set(self.casts.get() + 1);
        self.hit
    }
}

/// Accepts every move and reports a fixed set of flags
pub struct FakeIntegrator {
    pub flags: CollisionFlags,
    pub moves: Vec<Vec3>,
}

impl FakeIntegrator {
    pub fn touching(flags: CollisionFlags) -> Self {
        Self {
            flags,
            moves: Vec::new(),
        }
    }
}

impl MovementIntegrator for FakeIntegrator {
    fn move_by(&mut self, displacement: Vec3) -> CollisionFlags {
        self.moves.push(displacement);
        self.flags
    }
}

#[derive(Default)]
pub struct FakeFall {
    pub falling: bool,
    pub falls_started: u32,
    pub gravity: f32,
}

impl FallHandler for FakeFall {
    fn set_falling(&mut self, falling: bool) {
        self.falling = falling;
    }

    fn begin_fall(&mut self) {
        self.falls_started += 1;
    }

    fn apply_gravity(&mut self, velocity: &mut Vec3, delta: f32) {
        velocity.y -= self.gravity * delta;
    }
}
