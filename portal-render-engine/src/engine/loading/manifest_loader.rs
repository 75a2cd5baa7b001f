use bevy::asset::LoadState;
use bevy::gltf::GltfLoaderSettings;
use bevy::image::{ImageLoaderSettings, ImageSampler};
use bevy::prelude::*;
use constants::path::MANIFEST_PATH;

use crate::engine::assets::portal_assets::PortalAssets;
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SceneManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading scene manifest from {MANIFEST_PATH}");
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Resolve the manifest, falling back to the built-in scene when it cannot be
/// read, then request the texture and model it names.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<SceneManifest>>,
) {
    if loading_progress.manifest_resolved {
        return;
    }

    let Some(handle) = &manifest_loader.handle else {
        return;
    };

    let manifest = if let Some(manifest) = manifests.get(handle) {
        info!("✓ Scene manifest loaded");
        manifest.clone()
    } else if let Some(LoadState::Failed(error)) = asset_server.get_load_state(handle) {
        warn!("Scene manifest unavailable ({error}), using built-in scene");
        SceneManifest::default()
    } else {
        return;
    };

    commands.insert_resource(request_scene_assets(&asset_server, &manifest));
    commands.insert_resource(manifest);
    loading_progress.manifest_resolved = true;
}

/// Queue the baked texture and the model bundle.
///
/// The texture is decoded with the manifest's colour space and a linear,
/// edge-clamped sampler. Row flipping happens after decoding, see
/// `texture_config`.
pub fn request_scene_assets(asset_server: &AssetServer, manifest: &SceneManifest) -> PortalAssets {
    let is_srgb = manifest.texture.srgb;
    debug!(
        "Requesting texture `{}` (srgb: {is_srgb}) and model `{}`",
        manifest.texture.path, manifest.model.path
    );

    let baked_texture = asset_server.load_with_settings(
        manifest.texture.path.clone(),
        move |settings: &mut ImageLoaderSettings| {
            settings.is_srgb = is_srgb;
            settings.sampler = ImageSampler::linear();
        },
    );
    // The source document carries the default scene's root list.
    let model = asset_server.load_with_settings(
        manifest.model.path.clone(),
        |settings: &mut GltfLoaderSettings| settings.include_source = true,
    );

    PortalAssets::new(baked_texture, model)
}
