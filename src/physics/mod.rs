mod body;
pub mod contact;
mod layers;
mod plugin;
pub mod probe;
#[cfg(test)]
pub(crate) mod testing;

pub use body::AgentBody;
pub use contact::{CollisionFlags, ContactFlags, KinematicMover, MovementIntegrator};
pub use layers::GameLayer;
pub use plugin::PhysicsPlugin;
pub use probe::{CapsuleCast, SpatialProbe, SurfaceHit, SurfaceProbe};
