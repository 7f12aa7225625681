use bevy::prelude::*;
use rand::{Rng, RngCore};

use super::config::SkillCheckConfig;

/// Read/practice access to an agent's climbing proficiency.
pub trait SkillModel {
    /// Records practice against the climbing track
    fn tally_practice(&mut self, uses: u32);
    /// Current live climbing proficiency, nominally 0 to 100
    fn proficiency(&self) -> i32;
    /// Whether the agent's race carries the innate climbing bonus
    fn has_racial_bonus(&self) -> bool;
    /// Whether an enhanced climbing effect is active
    fn is_enhanced(&self) -> bool;
}

/// Source of percentile rolls for skill checks.
pub trait Dice {
    /// Uniform roll in `1..=100`
    fn d100(&mut self) -> u32;
}

impl<R: RngCore> Dice for R {
    fn d100(&mut self) -> u32 {
        self.gen_range(1..=100)
    }
}

/// Outcome of a single skill check
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillCheck {
    /// Proficiency after modifiers and clamping
    pub proficiency: i32,
    /// Highest roll that still passes
    pub threshold: f32,
    pub roll: u32,
    pub passed: bool,
    /// The roll failed but submerged feet kept the agent from slipping
    pub water_assisted: bool,
}

/// Proficiency used for a check: racial bonus first, then the enhancement multiplier,
/// then clamped into the configured band.
pub fn effective_proficiency(skill: &dyn SkillModel, config: &SkillCheckConfig) -> i32 {
    let mut value = skill.proficiency();
    if skill.has_racial_bonus() {
        value = value.saturating_add(config.racial_bonus);
    }
    if skill.is_enhanced() {
        value = value.saturating_mul(config.enhanced_skill_multiplier);
    }
    value.max(config.min_skill).min(config.max_skill)
}

/// Interpolates from `base_percent` at proficiency 0 to 101 at proficiency 100
pub fn roll_threshold(base_percent: i32, proficiency: i32) -> f32 {
    let t = (proficiency as f32 * 0.01).clamp(0.0, 1.0);
    base_percent as f32 + (101.0 - base_percent as f32) * t
}

/// Runs a climbing skill check.
///
/// Practice is recorded whether or not the check passes. A roll above the threshold
/// fails unless `submerged` is set, since the water keeps holding the agent up.
pub fn skill_check(
    skill: &mut dyn SkillModel,
    base_percent: i32,
    config: &SkillCheckConfig,
    submerged: bool,
    dice: &mut dyn Dice,
) -> SkillCheck {
    skill.tally_practice(1);

    let proficiency = effective_proficiency(&*skill, config);
    let threshold = roll_threshold(base_percent, proficiency);
    let roll = dice.d100();
    let failed = threshold < roll as f32;

    SkillCheck {
        proficiency,
        threshold,
        roll,
        passed: !failed || submerged,
        water_assisted: failed && submerged,
    }
}

/// Climbing proficiency track of an agent
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ClimbingSkill {
    /// Live skill value, 0 to 100
    pub value: i32,
    /// Practice uses tallied so far
    pub uses: u32,
    /// Innate racial climbing trait
    pub racial_bonus: bool,
}

impl ClimbingSkill {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            ..default()
        }
    }

    pub fn with_racial_bonus(mut self) -> Self {
        self.racial_bonus = true;
        self
    }
}

/// Marker: an enhanced climbing effect is active on the agent
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct EnhancedClimbing;

/// [`SkillModel`] view over an agent's components for one system run
pub struct SkillHandle<'a> {
    pub skill: &'a mut ClimbingSkill,
    pub enhanced: bool,
}

impl SkillModel for SkillHandle<'_> {
    fn tally_practice(&mut self, uses: u32) {
        self.skill.uses = self.skill.uses.saturating_add(uses);
    }

    fn proficiency(&self) -> i32 {
        self.skill.value
    }

    fn has_racial_bonus(&self) -> bool {
        self.skill.racial_bonus
    }

    fn is_enhanced(&self) -> bool {
        self.enhanced
    }
}
