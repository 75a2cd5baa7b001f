use bevy::math::Vec3;

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

pub const CAMERA_START_POSITION: Vec3 = Vec3::new(4.0, 2.0, 4.0);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;

/// Device pixel ratio cap, bounds fill-rate on dense displays.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Canvas element the web build renders into.
pub const CANVAS_SELECTOR: &str = "#portal";

pub const WINDOW_TITLE: &str = "Portal";

/// Seconds between frame-rate log lines.
pub const FPS_LOG_INTERVAL: f32 = 5.0;
