use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tuning for the climbing motor.
///
/// Timings are expressed in classic timer ticks and converted with `tick_seconds`,
/// so the defaults keep the original pacing regardless of the fixed step rate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbConfig {
    /// Length of one timer tick in seconds
    pub tick_seconds: f32,
    /// Ticks the precondition must hold before the climb commits
    pub start_delay_ticks: f32,
    /// Ticks between grip checks while holding on
    pub continue_check_ticks: f32,
    /// Fraction of the grip check interval used between regain checks while slipping
    pub regain_check_ratio: f32,
    /// Minimum percent chance to regain hold while slipping
    pub regain_hold_min_chance: i32,
    /// Minimum percent chance to keep climbing with a good hold
    pub continue_climb_min_chance: i32,
    /// Horizontal drift that cancels an attempt that has not committed yet
    pub stop_climbing_distance: f32,
    /// Upward speed while holding on, in m/s
    pub climb_rate: f32,
    /// Climb speed multiplier granted by the enhanced climbing effect
    pub enhanced_multiplier: f32,
    /// How far in front of the body the ledge probe reaches
    pub probe_distance: f32,
    /// How far the probe capsule is dropped below the collider center, as a fraction of its height
    pub probe_lower_fraction: f32,
    /// Distance from the collider bottom down to the soles, used for the water test
    pub foot_offset: f32,
    pub skill: SkillCheckConfig,
}

impl Default for ClimbConfig {
    fn default() -> Self {
        Self {
            tick_seconds: 0.055,
            start_delay_ticks: 14.0,
            continue_check_ticks: 15.0,
            regain_check_ratio: 0.37,
            regain_hold_min_chance: 20,
            continue_climb_min_chance: 70,
            stop_climbing_distance: 0.12,
            climb_rate: 1.0,
            enhanced_multiplier: 2.0,
            probe_distance: 0.15,
            probe_lower_fraction: 0.40,
            foot_offset: 0.25,
            skill: SkillCheckConfig::default(),
        }
    }
}

/// Modifiers applied to climbing proficiency before a check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCheckConfig {
    pub min_skill: i32,
    pub max_skill: i32,
    /// Flat bonus for agents with the racial climbing trait
    pub racial_bonus: i32,
    /// Proficiency multiplier granted by the enhanced climbing effect
    pub enhanced_skill_multiplier: i32,
}

impl Default for SkillCheckConfig {
    fn default() -> Self {
        Self {
            min_skill: 5,
            max_skill: 95,
            racial_bonus: 30,
            enhanced_skill_multiplier: 2,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ClimbConfigError {
    #[error("I/O while reading climb config: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
    #[error("Invalid climb config field '{field}': {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

impl ClimbConfig {
    /// Seconds the precondition must hold before committing to a climb
    pub fn start_delay(&self) -> f32 {
        self.tick_seconds * self.start_delay_ticks
    }

    /// Seconds between grip checks while holding on
    pub fn continue_interval(&self) -> f32 {
        self.tick_seconds * self.continue_check_ticks
    }

    /// Seconds between regain checks while slipping
    pub fn regain_interval(&self) -> f32 {
        self.continue_interval() * self.regain_check_ratio
    }

    pub fn from_ron(source: &str) -> Result<Self, ClimbConfigError> {
        let config: Self = ron::from_str(source).map_err(|e| ClimbConfigError::Ron(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClimbConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron(&source)
    }

    pub fn validate(&self) -> Result<(), ClimbConfigError> {
        let invalid = |field, reason| Err(ClimbConfigError::Invalid { field, reason });

        if self.tick_seconds <= 0.0 {
            return invalid("tick_seconds", "must be positive");
        }
        if self.start_delay_ticks <= 0.0 {
            return invalid("start_delay_ticks", "must be positive");
        }
        if self.continue_check_ticks <= 0.0 {
            return invalid("continue_check_ticks", "must be positive");
        }
        if !(self.regain_check_ratio > 0.0 && self.regain_check_ratio <= 1.0) {
            return invalid("regain_check_ratio", "must be in (0, 1]");
        }
        if !(0..=100).contains(&self.regain_hold_min_chance) {
            return invalid("regain_hold_min_chance", "must be a percentage");
        }
        if !(0..=100).contains(&self.continue_climb_min_chance) {
            return invalid("continue_climb_min_chance", "must be a percentage");
        }
        if self.probe_distance < 0.0 {
            return invalid("probe_distance", "must not be negative");
        }
        if self.skill.min_skill > self.skill.max_skill {
            return invalid("skill", "min_skill exceeds max_skill");
        }
        if self.skill.min_skill < 0 || self.skill.max_skill > 100 {
            return invalid("skill", "band must lie within 0..=100");
        }
        Ok(())
    }
}
