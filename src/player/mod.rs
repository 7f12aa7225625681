pub mod fall;
pub mod input;
pub mod movement;
mod plugin;
mod state;

pub use fall::FallState;
pub use input::{MoveAction, MoveInput};
pub use plugin::{spawn_player, PlayerPlugin};
pub use state::*;
