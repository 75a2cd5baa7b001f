//! Staged loading of the portal scene.
//!
//! Manifest, then texture and model, then texture configuration, then scene
//! assembly. Each stage records completion in `LoadingProgress`.

/// Load-state polling for the baked texture and the model bundle.
///
/// The first failure moves the loader into its degraded state.
pub mod asset_loader;

/// Scene manifest loading with fallback to the built-in scene.
///
/// Requests the texture and model once the manifest is resolved.
pub mod manifest_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// Material binding and single-batch insertion of the model tree.
pub mod scene_assembly;

/// Post-decode texture adjustments applied before materials are built.
pub mod texture_config;
