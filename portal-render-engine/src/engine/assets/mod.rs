//! Scene asset descriptions and the handles requested from them.

/// Texture and model handles for the portal scene.
pub mod portal_assets;

/// JSON scene manifest with asset paths, texture settings and portal variant.
///
/// Every field defaults to the built-in scene.
pub mod scene_manifest;
