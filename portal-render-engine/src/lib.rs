//! Interactive portal scene: a baked model with shader-driven materials,
//! firefly particles and damped orbit controls, for the browser and native.

pub mod engine;
