use bevy::prelude::*;

/// Snapshot of an agent's collider for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentBody {
    /// Collider center in world space
    pub position: Vec3,
    /// Horizontal facing direction
    pub facing: Dir3,
    /// Collider radius
    pub radius: f32,
    /// Total collider height
    pub height: f32,
    /// Forward movement speed in m/s
    pub speed: f32,
}

impl AgentBody {
    /// Position projected onto the ground plane (x, z)
    pub fn horizontal_position(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    /// Height of the soles, lowered by `foot_offset` below the collider bottom
    pub fn feet_height(&self, foot_offset: f32) -> f32 {
        self.position.y - self.height / 2.0 - foot_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feet_sit_below_collider_bottom() {
        let body = AgentBody {
            position: Vec3::new(3.0, 10.0, -2.0),
            facing: Dir3::Z,
            radius: 0.4,
            height: 1.8,
            speed: 5.0,
        };
        assert_eq!(body.horizontal_position(), Vec2::new(3.0, -2.0));
        assert!((body.feet_height(0.25) - 8.85).abs() < 1e-5);
    }
}
