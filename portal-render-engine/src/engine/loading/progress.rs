use bevy::prelude::*;

use crate::engine::error::SceneError;

/// Stage flags for the portal scene loader, in the order they complete.
#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub manifest_resolved: bool,
    pub texture_loaded: bool,
    pub model_loaded: bool,
    pub texture_configured: bool,
    pub scene_assembled: bool,
    /// First asset failure. Once set no further stage runs.
    pub failure: Option<SceneError>,
}

impl LoadingProgress {
    pub fn assets_loaded(&self) -> bool {
        self.texture_loaded && self.model_loaded
    }

    pub fn has_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn fail(&mut self, error: SceneError) {
        error!("Portal scene unavailable: {error}");
        if self.failure.is_none() {
            self.failure = Some(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_failure(path: &str) -> SceneError {
        SceneError::AssetLoad {
            path: path.to_string(),
            reason: "Path not found".to_string(),
        }
    }

    #[test]
    fn first_failure_is_kept() {
        let mut progress = LoadingProgress::default();
        progress.fail(asset_failure("portal/texture.jpg"));
        progress.fail(asset_failure("portal/portal.glb"));

        assert!(progress.has_failed());
        assert!(matches!(
            &progress.failure,
            Some(SceneError::AssetLoad { path, .. }) if path == "portal/texture.jpg"
        ));
    }

    #[test]
    fn assets_loaded_needs_both() {
        let mut progress = LoadingProgress {
            texture_loaded: true,
            ..default()
        };
        assert!(!progress.assets_loaded());
        progress.model_loaded = true;
        assert!(progress.assets_loaded());
    }
}
