use bevy::gltf::Gltf;
use bevy::prelude::*;

/// Handles of the two scene assets requested from the manifest.
#[derive(Resource, Debug, Clone, Default)]
pub struct PortalAssets {
    pub baked_texture: Handle<Image>,
    pub model: Handle<Gltf>,
}

impl PortalAssets {
    pub fn new(baked_texture: Handle<Image>, model: Handle<Gltf>) -> Self {
        Self {
            baked_texture,
            model,
        }
    }
}
