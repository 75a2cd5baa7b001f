use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::prelude::*;

use crate::engine::assets::portal_assets::PortalAssets;
use crate::engine::error::SceneError;
use crate::engine::loading::progress::LoadingProgress;

/// glTF geometry extensions Bevy's loader rejects.
const UNSUPPORTED_GEOMETRY_EXTENSIONS: [&str; 1] = ["KHR_draco_mesh_compression"];

pub enum AssetPoll {
    Pending,
    Ready,
    Failed(SceneError),
}

/// Load state of an asset and everything it depends on. A glTF bundle is only
/// ready once its meshes, materials and images are too.
pub fn poll_asset<A: Asset>(asset_server: &AssetServer, handle: &Handle<A>) -> AssetPoll {
    let failure = match asset_server.get_load_state(handle) {
        Some(LoadState::Failed(error)) => Some(error.to_string()),
        _ => match asset_server.get_recursive_dependency_load_state(handle) {
            Some(RecursiveDependencyLoadState::Failed(error)) => Some(error.to_string()),
            _ => None,
        },
    };

    if let Some(reason) = failure {
        let path = handle
            .path()
            .map(|path| path.to_string())
            .unwrap_or_else(|| format!("{:?}", handle.id()));
        return AssetPoll::Failed(load_error(path, reason));
    }

    if asset_server.is_loaded_with_dependencies(handle) {
        AssetPoll::Ready
    } else {
        AssetPoll::Pending
    }
}

/// Name a missing geometry codec explicitly; anything else is a plain load
/// failure.
fn load_error(path: String, reason: String) -> SceneError {
    match UNSUPPORTED_GEOMETRY_EXTENSIONS
        .iter()
        .find(|extension| reason.contains(*extension))
    {
        Some(extension) => SceneError::CompressedGeometry {
            path,
            extension: extension.to_string(),
        },
        None => SceneError::AssetLoad { path, reason },
    }
}

// Check if the baked texture and model bundle are loaded
pub fn check_asset_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    assets: Option<Res<PortalAssets>>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.has_failed()
        || loading_progress.assets_loaded()
        || !loading_progress.manifest_resolved
    {
        return;
    }

    let Some(assets) = assets else {
        return;
    };

    if !loading_progress.texture_loaded {
        match poll_asset(&asset_server, &assets.baked_texture) {
            AssetPoll::Ready => {
                info!("✓ Baked texture loaded");
                loading_progress.texture_loaded = true;
            }
            AssetPoll::Failed(error) => {
                loading_progress.fail(error);
                return;
            }
            AssetPoll::Pending => {}
        }
    }

    if !loading_progress.model_loaded {
        match poll_asset(&asset_server, &assets.model) {
            AssetPoll::Ready => {
                info!("✓ Model bundle loaded");
                loading_progress.model_loaded = true;
            }
            AssetPoll::Failed(error) => loading_progress.fail(error),
            AssetPoll::Pending => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draco_bundle_reports_compressed_geometry() {
        let reason = "Invalid glTF file: extensionsRequired[0] = \"KHR_draco_mesh_compression\": Unsupported extension";
        let error = load_error("portal/portal.glb".to_string(), reason.to_string());

        let SceneError::CompressedGeometry { path, extension } = &error else {
            panic!("expected compressed geometry error, got {error:?}");
        };
        assert_eq!(path, "portal/portal.glb");
        assert_eq!(extension, "KHR_draco_mesh_compression");
        assert!(error.to_string().contains("decompressed geometry"));
    }

    #[test]
    fn other_failures_stay_asset_load() {
        let error = load_error(
            "portal/texture.jpg".to_string(),
            "Path not found: portal/texture.jpg".to_string(),
        );
        assert!(matches!(error, SceneError::AssetLoad { .. }));
    }
}
