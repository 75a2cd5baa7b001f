//! Materials bound to the portal scene.
//!
//! Every material lives in Bevy's asset storage; scene nodes only hold
//! handles, so one uniform write reaches every node sharing a material.

/// Additive, depth-write-free material for the firefly quads.
pub mod firefly_material;

/// Shader-driven portal surface with an animated noise pattern.
pub mod portal_material;

/// Material registry and the slot tags recorded on scene nodes.
pub mod registry;
