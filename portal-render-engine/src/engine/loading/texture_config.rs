use bevy::prelude::*;

use crate::engine::assets::portal_assets::PortalAssets;
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::loading::progress::LoadingProgress;

// Apply post-decode texture settings before any material samples the image
pub fn configure_loaded_textures(
    mut loading_progress: ResMut<LoadingProgress>,
    assets: Option<Res<PortalAssets>>,
    manifest: Option<Res<SceneManifest>>,
    mut images: ResMut<Assets<Image>>,
) {
    if loading_progress.texture_configured
        || !loading_progress.texture_loaded
        || loading_progress.has_failed()
    {
        return;
    }

    let (Some(assets), Some(manifest)) = (assets, manifest) else {
        return;
    };

    if manifest.texture.flip_y {
        let Some(image) = images.get_mut(&assets.baked_texture) else {
            return;
        };
        flip_image_vertically(image);
        debug!("Baked texture flipped vertically");
    }

    loading_progress.texture_configured = true;
}

/// Reverse the row order of every layer in place.
pub fn flip_image_vertically(image: &mut Image) {
    let height = image.height() as usize;
    let layers = image.texture_descriptor.size.depth_or_array_layers.max(1) as usize;
    let Some(data) = image.data.as_mut() else {
        return;
    };
    if height < 2 || data.is_empty() {
        return;
    }

    let layer_bytes = data.len() / layers;
    let row_bytes = layer_bytes / height;

    for layer in data.chunks_exact_mut(layer_bytes) {
        for top in 0..height / 2 {
            let bottom = height - 1 - top;
            let (upper, lower) = layer.split_at_mut(bottom * row_bytes);
            upper[top * row_bytes..(top + 1) * row_bytes].swap_with_slice(&mut lower[..row_bytes]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::RenderAssetUsages;
    use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

    fn column_image(rows: &[[u8; 4]]) -> Image {
        Image::new(
            Extent3d {
                width: 1,
                height: rows.len() as u32,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            rows.concat(),
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }

    #[test]
    fn flips_odd_row_count() {
        let mut image = column_image(&[[1; 4], [2; 4], [3; 4]]);
        flip_image_vertically(&mut image);
        assert_eq!(
            image.data.as_deref(),
            Some([[3; 4], [2; 4], [1; 4]].concat().as_slice())
        );
    }

    #[test]
    fn flipping_twice_restores_image() {
        let rows = [[10, 20, 30, 255], [40, 50, 60, 255], [70, 80, 90, 255], [0, 0, 0, 0]];
        let mut image = column_image(&rows);
        flip_image_vertically(&mut image);
        assert_ne!(image.data.as_deref(), Some(rows.concat().as_slice()));
        flip_image_vertically(&mut image);
        assert_eq!(image.data.as_deref(), Some(rows.concat().as_slice()));
    }
}
