use bevy::ecs::observer::On;
use bevy::prelude::{Component, Deref, DerefMut, EntityEvent, Query, Vec2};
use bevy_enhanced_input::prelude::*;

/// Move in a direction (WASD)
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct MoveAction;

/// Stores the current movement input vector
#[derive(Component, Default, Deref, DerefMut)]
pub struct MoveInput(pub Vec2);

impl MoveInput {
    /// Forward is held when the stick or keys point mostly ahead
    pub fn forward_held(&self) -> bool {
        self.y > 0.5
    }
}

/// System to handle move input via observer
pub fn handle_move_input(trigger: On<Fire<MoveAction>>, mut query: Query<&mut MoveInput>) {
    if let Ok(mut move_input) = query.get_mut(trigger.event_target()) {
        move_input.0 = trigger.value;
    }
}

/// Clear move input when all movement keys are released
pub fn handle_move_end(trigger: On<Complete<MoveAction>>, mut query: Query<&mut MoveInput>) {
    if let Ok(mut move_input) = query.get_mut(trigger.event_target()) {
        move_input.0 = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_needs_a_clear_push() {
        assert!(MoveInput(Vec2::new(0.0, 1.0)).forward_held());
        assert!(MoveInput(Vec2::new(0.7, 0.7)).forward_held());
        assert!(!MoveInput(Vec2::new(1.0, 0.3)).forward_held());
        assert!(!MoveInput(Vec2::new(0.0, -1.0)).forward_held());
    }
}
