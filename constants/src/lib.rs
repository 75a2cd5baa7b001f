//! Hard-coded scene defaults shared across the workspace.
//!
//! The scene manifest may override the asset paths and material colours,
//! everything else here is fixed at compile time.

pub mod controls;
pub mod materials;
pub mod particles;
pub mod path;
pub mod render_settings;
