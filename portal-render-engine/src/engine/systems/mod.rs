//! Frame diagnostics.

/// Periodic FPS logging and the native on-screen FPS overlay.
pub mod fps_tracking;
