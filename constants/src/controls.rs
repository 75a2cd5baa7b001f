/// Fraction of the pending orbit motion applied per frame.
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;

/// Zoom multiplier per wheel line.
pub const ORBIT_ZOOM_BASE: f32 = 0.95;

pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;

pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;

/// Pixel wheel deltas are divided by this to get line steps.
pub const WHEEL_PIXELS_PER_LINE: f32 = 100.0;
