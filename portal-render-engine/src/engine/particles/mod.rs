//! Firefly particle system.

/// Particle generation, quad mesh expansion and entity spawning.
pub mod fireflies;
