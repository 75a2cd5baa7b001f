/// Number of fireflies generated at startup.
pub const FIREFLY_COUNT: usize = 30;

/// Base point size in pixels before scale, pixel ratio and perspective.
pub const FIREFLY_BASE_SIZE: f32 = 40.0;

/// Horizontal half extent of the firefly volume on X and Z.
pub const FIREFLY_HALF_EXTENT: f32 = 2.0;

/// Vertical band the fireflies hover in.
pub const FIREFLY_MIN_HEIGHT: f32 = 0.5;
pub const FIREFLY_MAX_HEIGHT: f32 = 1.5;
