use std::ops::{BitOr, BitOrAssign};

use avian3d::prelude::*;
use bevy::prelude::*;

/// Maximum angle (in radians) between a contact normal and up that still counts as ground
pub const MAX_SLOPE_ANGLE: f32 = 0.785; // ~45 degrees

/// Distance to cast for ground detection
pub const GROUND_CAST_DISTANCE: f32 = 0.1;

/// Gap kept between the swept capsule and whatever it hits
pub const SKIN_WIDTH: f32 = 0.01;

/// Number of sweep-and-slide passes per move
const MAX_SLIDES: usize = 3;

/// Which sides of a collider touched something during the last move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CollisionFlags(u8);

impl CollisionFlags {
    pub const NONE: Self = Self(0);
    pub const SIDES: Self = Self(1);
    pub const ABOVE: Self = Self(1 << 1);
    pub const BELOW: Self = Self(1 << 2);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CollisionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Collision flags of an agent, refreshed every fixed step.
///
/// Written by contact sensing while the agent moves on its own and by the
/// kinematic mover while it is climbing.
#[derive(Component, Default, Deref, DerefMut, Debug)]
pub struct ContactFlags(pub CollisionFlags);

/// Applies a displacement to a collider and reports what it touched.
pub trait MovementIntegrator {
    fn move_by(&mut self, displacement: Vec3) -> CollisionFlags;
}

/// Sorts a contact normal into floor, ceiling or wall
pub fn classify_normal(normal: Vec3) -> CollisionFlags {
    let angle = normal.angle_between(Vec3::Y);
    if angle <= MAX_SLOPE_ANGLE {
        CollisionFlags::BELOW
    } else if angle >= std::f32::consts::PI - MAX_SLOPE_ANGLE {
        CollisionFlags::ABOVE
    } else {
        CollisionFlags::SIDES
    }
}

/// Capsule matching a standing collider of the given radius and total height
pub fn body_capsule(radius: f32, height: f32) -> Collider {
    Collider::capsule(radius, (height - radius * 2.0).max(0.0))
}

/// Performs ground detection for a character, returning the ground normal
pub fn detect_ground(
    spatial_query: &SpatialQuery,
    position: Vec3,
    collider_radius: f32,
    collider_height: f32,
    world_layer: LayerMask,
) -> Option<Vec3> {
    // Use a smaller sphere for ground detection to avoid false positives on walls
    let cast_radius = collider_radius * 0.5;
    let cast_shape = Collider::sphere(cast_radius);

    // Start the cast from the bottom of the capsule
    let capsule_bottom = position.y - collider_height / 2.0 + collider_radius;
    let cast_origin = Vec3::new(position.x, capsule_bottom, position.z);

    let filter = SpatialQueryFilter::default().with_mask(world_layer);
    let config = ShapeCastConfig {
        max_distance: cast_radius + GROUND_CAST_DISTANCE,
        ..default()
    };

    spatial_query
        .cast_shape(&cast_shape, cast_origin, Quat::IDENTITY, Dir3::NEG_Y, &config, &filter)
        .filter(|hit| classify_normal(hit.normal1) == CollisionFlags::BELOW)
        .map(|hit| hit.normal1)
}

/// Sweeps the body capsule a short distance horizontally and reports a wall in the way.
///
/// Returns the wall normal when the hit surface is too steep to stand on.
pub fn detect_wall(
    spatial_query: &SpatialQuery,
    position: Vec3,
    direction: Dir3,
    collider_radius: f32,
    collider_height: f32,
    reach: f32,
    world_layer: LayerMask,
) -> Option<Vec3> {
    let shape = body_capsule(collider_radius, collider_height);
    let filter = SpatialQueryFilter::default().with_mask(world_layer);
    let config = ShapeCastConfig {
        max_distance: reach,
        ..default()
    };

    spatial_query
        .cast_shape(&shape, position, Quat::IDENTITY, direction, &config, &filter)
        .filter(|hit| classify_normal(hit.normal1) == CollisionFlags::SIDES)
        .map(|hit| hit.normal1)
}

/// Moves a collider by sweeping its capsule and sliding along whatever it hits,
/// the way a kinematic character controller does.
pub struct KinematicMover<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    transform: &'a mut Transform,
    shape: Collider,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> KinematicMover<'a, 'w, 's> {
    pub fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        transform: &'a mut Transform,
        collider_radius: f32,
        collider_height: f32,
        world_layer: LayerMask,
    ) -> Self {
        Self {
            spatial_query,
            transform,
            shape: body_capsule(collider_radius, collider_height),
            filter: SpatialQueryFilter::default().with_mask(world_layer),
        }
    }
}

impl MovementIntegrator for KinematicMover<'_, '_, '_> {
    fn move_by(&mut self, displacement: Vec3) -> CollisionFlags {
        let mut flags = CollisionFlags::NONE;
        let mut remaining = displacement;

        for _ in 0..MAX_SLIDES {
            let Ok((direction, length)) = Dir3::new_and_length(remaining) else {
                break;
            };

            // Starting in contact with a wall must not pin the body when moving along it
            let config = ShapeCastConfig {
                max_distance: length + SKIN_WIDTH,
                ignore_origin_penetration: true,
                ..default()
            };
            let hit = self.spatial_query.cast_shape(
                &self.shape,
                self.transform.translation,
                Quat::IDENTITY,
                direction,
                &config,
                &self.filter,
            );

            let Some(hit) = hit else {
                self.transform.translation += remaining;
                break;
            };

            let travel = (hit.distance - SKIN_WIDTH).max(0.0).min(length);
            self.transform.translation += direction * travel;
            flags |= classify_normal(hit.normal1);

            // Slide the leftover along the hit surface
            let leftover = direction * (length - travel);
            remaining = leftover - hit.normal1 * leftover.dot(hit.normal1);
        }

        flags
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::physics::testing::{physics_app, settle, spawn_floor, spawn_wall};
    use crate::physics::GameLayer;

    fn sweep(app: &mut App, from: Vec3, displacement: Vec3) -> (CollisionFlags, Vec3) {
        app.world_mut()
            .run_system_once(move |spatial_query: SpatialQuery| {
                let mut transform = Transform::from_translation(from);
                let flags = KinematicMover::new(
                    &spatial_query,
                    &mut transform,
                    0.4,
                    1.8,
                    GameLayer::World.into(),
                )
                .move_by(displacement);
                (flags, transform.translation)
            })
            .unwrap()
    }

    #[test]
    fn flags_combine_and_contain() {
        let mut flags = CollisionFlags::SIDES;
        assert!(flags.contains(CollisionFlags::SIDES));
        assert!(!flags.contains(CollisionFlags::BELOW));

        flags |= CollisionFlags::BELOW;
        assert!(flags.contains(CollisionFlags::SIDES | CollisionFlags::BELOW));
        assert!(!flags.contains(CollisionFlags::ABOVE));
        assert!(CollisionFlags::default().is_empty());
    }

    #[test]
    fn normals_classify_by_slope() {
        assert_eq!(classify_normal(Vec3::Y), CollisionFlags::BELOW);
        assert_eq!(classify_normal(Vec3::NEG_Y), CollisionFlags::ABOVE);
        assert_eq!(classify_normal(Vec3::X), CollisionFlags::SIDES);
        assert_eq!(classify_normal(Vec3::new(0.0, 0.5, -1.0).normalize()), CollisionFlags::SIDES);
        assert_eq!(classify_normal(Vec3::new(0.0, 1.0, 0.5).normalize()), CollisionFlags::BELOW);
    }

    #[test]
    fn mover_lands_on_the_floor() {
        let mut app = physics_app();
        app.finish();
        spawn_floor(&mut app);
        settle(&mut app);

        // Capsule bottom starts 0.05 above the floor
        let (flags, position) = sweep(&mut app, Vec3::new(0.0, 0.95, 0.0), Vec3::NEG_Y * 0.5);
        assert!(flags.contains(CollisionFlags::BELOW));
        assert!(!flags.contains(CollisionFlags::SIDES));
        assert!(position.y > 0.9 && position.y < 0.93, "stopped at {}", position.y);
    }

    #[test]
    fn mover_slides_up_along_a_wall() {
        let mut app = physics_app();
        app.finish();
        spawn_wall(&mut app);
        settle(&mut app);

        let start = Vec3::new(0.0, 2.0, -0.55);
        let (flags, position) = sweep(&mut app, start, Vec3::new(0.0, 0.1, -0.2));
        assert!(flags.contains(CollisionFlags::SIDES));
        assert!(!flags.contains(CollisionFlags::BELOW));
        // Stopped at the face, the blocked part of the move turned into height
        assert!(position.z >= -0.6 && position.z < -0.58, "z = {}", position.z);
        assert!((position.y - 2.1).abs() < 1e-3, "y = {}", position.y);
    }

    #[test]
    fn free_move_reports_nothing() {
        let mut app = physics_app();
        app.finish();
        spawn_wall(&mut app);
        settle(&mut app);

        let (flags, position) = sweep(&mut app, Vec3::new(0.0, 2.0, 2.0), Vec3::new(0.5, 0.2, 0.0));
        assert!(flags.is_empty());
        assert!((position - Vec3::new(0.5, 2.2, 2.0)).length() < 1e-5);
    }
}
