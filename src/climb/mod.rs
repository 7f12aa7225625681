mod config;
mod messages;
mod motor;
mod plugin;
mod skill;
mod state;
mod systems;
#[cfg(test)]
mod testing;

pub use config::{ClimbConfig, ClimbConfigError, SkillCheckConfig};
pub use messages::{ClimbMessage, ClimbNotice, ClimbNotifier};
pub use motor::{climb_velocity, ClimbFrame, ClimbHost, ClimbMotor, FallHandler, MovementCommand};
pub use plugin::{ClimbPlugin, ClimbSystems};
pub use skill::{
    effective_proficiency, roll_threshold, skill_check, ClimbingSkill, Dice, EnhancedClimbing,
    SkillCheck, SkillHandle, SkillModel,
};
pub use state::{ClimbPhase, ClimbState};
pub use systems::{climbing_check, sync_climb_markers, ClimbRng};
