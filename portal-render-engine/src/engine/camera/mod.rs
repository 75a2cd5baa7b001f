//! Portal camera and its damped orbit controls.

/// Damped orbit, pan and zoom driven by mouse, wheel and touch input.
pub mod orbit_controls;

/// Perspective camera setup.
pub mod portal_camera;
