use bevy::prelude::*;
use bevy::reflect::TypePath;
use constants::materials::{PORTAL_COLOUR_END, PORTAL_COLOUR_START, PORTAL_FLAT_COLOUR};
use constants::path::{DEFAULT_MODEL_PATH, DEFAULT_TEXTURE_PATH};
use serde::{Deserialize, Serialize};

use crate::engine::error::{Result, SceneError};

/// Baked texture location and decode settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSource {
    pub path: String,
    /// Flip rows after decoding. Baked glTF UVs expect the image as stored.
    pub flip_y: bool,
    /// Treat texel values as sRGB encoded.
    pub srgb: bool,
}

impl Default for TextureSource {
    fn default() -> Self {
        Self {
            path: DEFAULT_TEXTURE_PATH.to_string(),
            flip_y: false,
            srgb: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSource {
    pub path: String,
}

impl Default for ModelSource {
    fn default() -> Self {
        Self {
            path: DEFAULT_MODEL_PATH.to_string(),
        }
    }
}

/// Surface variant bound to the portal node, colours as hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PortalSurface {
    Flat {
        colour: String,
    },
    Shader {
        colour_start: String,
        colour_end: String,
    },
}

impl PortalSurface {
    pub fn shader() -> Self {
        PortalSurface::Shader {
            colour_start: PORTAL_COLOUR_START.to_string(),
            colour_end: PORTAL_COLOUR_END.to_string(),
        }
    }
}

impl Default for PortalSurface {
    fn default() -> Self {
        PortalSurface::Flat {
            colour: PORTAL_FLAT_COLOUR.to_string(),
        }
    }
}

/// Scene description loaded from JSON. Missing fields fall back to the
/// built-in scene.
#[derive(Asset, TypePath, Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneManifest {
    pub texture: TextureSource,
    pub model: ModelSource,
    pub portal: PortalSurface,
}

/// Parse a `#rrggbb` (or any CSS hex form Bevy accepts) colour.
pub fn parse_colour(value: &str) -> Result<Color> {
    Srgba::hex(value)
        .map(Color::from)
        .map_err(|source| SceneError::InvalidColour {
            value: value.to_string(),
            source,
        })
}
