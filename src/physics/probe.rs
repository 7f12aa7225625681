use avian3d::prelude::*;
use bevy::prelude::*;

use super::AgentBody;

/// A capsule swept along a direction, described by its segment endpoints in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleCast {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
    pub direction: Dir3,
    pub max_distance: f32,
}

impl CapsuleCast {
    /// Capsule the size of the agent's collider, dropped by `lower_fraction` of its
    /// height, cast along the agent's facing.
    ///
    /// With the usual 0.4 the segment spans -40% to +60% of the collider height
    /// around its center, so the probe reaches a little above the head.
    pub fn forward_from(body: &AgentBody, lower_fraction: f32, max_distance: f32) -> Self {
        let start = body.position - Vec3::Y * body.height * lower_fraction;
        let end = start + Vec3::Y * body.height;
        Self {
            start,
            end,
            radius: body.radius,
            direction: body.facing,
            max_distance,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }
}

/// Surface found by a probe
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    /// Surface normal, pointing out of the surface toward the caster
    pub normal: Vec3,
    pub distance: f32,
}

/// Detects climbable surfaces in front of an agent.
pub trait SurfaceProbe {
    fn cast(&self, cast: &CapsuleCast) -> Option<SurfaceHit>;
}

/// [`SurfaceProbe`] backed by Avian's spatial query pipeline.
pub struct SpatialProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> SpatialProbe<'a, 'w, 's> {
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>, world_layer: LayerMask) -> Self {
        Self {
            spatial_query,
            filter: SpatialQueryFilter::default().with_mask(world_layer),
        }
    }
}

impl SurfaceProbe for SpatialProbe<'_, '_, '_> {
    fn cast(&self, cast: &CapsuleCast) -> Option<SurfaceHit> {
        let center = cast.center();
        let shape =
            Collider::capsule_endpoints(cast.radius, cast.start - center, cast.end - center);
        let config = ShapeCastConfig {
            max_distance: cast.max_distance,
            ..default()
        };

        self.spatial_query
            .cast_shape(&shape, center, Quat::IDENTITY, cast.direction, &config, &self.filter)
            .map(|hit| SurfaceHit {
                normal: hit.normal1,
                distance: hit.distance,
            })
    }
}
