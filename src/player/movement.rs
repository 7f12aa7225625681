use avian3d::prelude::*;
use bevy::prelude::*;

use super::state::*;
use crate::physics::contact::{detect_ground, detect_wall};
use crate::physics::{CollisionFlags, ContactFlags};

/// Horizontal facing of a body, falling back to -Z when it looks straight up or down
pub fn horizontal_facing(transform: &Transform) -> Dir3 {
    let forward = transform.forward().as_vec3();
    let flat = Vec3::new(forward.x, 0.0, forward.z);
    if flat.length_squared() < 1e-6 {
        return Dir3::NEG_Z;
    }
    Dir3::new(flat).unwrap_or(Dir3::NEG_Z)
}

/// Refreshes contact flags for players moving on their own.
///
/// While climbing, the kinematic mover reports contacts instead.
pub fn sense_contacts(
    spatial_query: SpatialQuery,
    mut query: Query<
        (&Transform, &PlayerConfig, &PlayerVelocity, &mut ContactFlags),
        (With<Player>, Without<Climbing>),
    >,
) {
    for (transform, config, velocity, mut contacts) in &mut query {
        let mut flags = CollisionFlags::NONE;
        let position = transform.translation;

        let ground = detect_ground(
            &spatial_query,
            position,
            config.radius,
            config.stand_height,
            config.world_layer,
        );
        if ground.is_some() && velocity.y < 1.0 {
            flags |= CollisionFlags::BELOW;
        }

        // Probe along horizontal motion, or the facing when pressed still against a wall
        let h_vel = Vec3::new(velocity.x, 0.0, velocity.z);
        let direction = if h_vel.length_squared() < 0.1 {
            horizontal_facing(transform)
        } else {
            Dir3::new(h_vel).unwrap_or_else(|_| horizontal_facing(transform))
        };
        if detect_wall(
            &spatial_query,
            position,
            direction,
            config.radius,
            config.stand_height,
            config.wall_reach,
            config.world_layer,
        )
        .is_some()
        {
            flags |= CollisionFlags::SIDES;
        }

        contacts.0 = flags;
    }
}

/// Syncs PlayerVelocity to Avian's LinearVelocity; climbers are moved kinematically and held still
pub fn apply_velocity(
    mut query: Query<(&mut PlayerVelocity, &mut LinearVelocity, Has<Climbing>), With<Player>>,
) {
    for (mut player_vel, mut lin_vel, climbing) in &mut query {
        if climbing {
            player_vel.0 = Vec3::ZERO;
            lin_vel.0 = Vec3::ZERO;
            continue;
        }

        lin_vel.0 = player_vel.0;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn facing_ignores_pitch() {
        let transform = Transform::from_rotation(Quat::from_rotation_x(0.6));
        assert!((horizontal_facing(&transform).as_vec3() - Vec3::NEG_Z).length() < 1e-5);

        let turned = Transform::from_rotation(Quat::from_rotation_y(FRAC_PI_2));
        assert!((horizontal_facing(&turned).as_vec3() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn straight_down_falls_back_to_default_facing() {
        let transform = Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2));
        assert_eq!(horizontal_facing(&transform), Dir3::NEG_Z);
    }
}
