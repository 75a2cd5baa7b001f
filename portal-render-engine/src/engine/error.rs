use bevy::color::HexColorError;
use thiserror::Error;

use crate::engine::scene::node_match::NodeMatcher;

/// Failures surfaced while assembling the portal scene.
///
/// None of these abort the render loop. Asset failures leave the scene empty,
/// node and material failures skip the affected binding.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Asset could not be fetched or decoded.
    #[error("asset `{path}` failed to load: {reason}")]
    AssetLoad { path: String, reason: String },

    /// Model geometry needs a compression codec this build cannot expand.
    #[error("model `{path}` requires {extension}; bundle it with decompressed geometry")]
    CompressedGeometry { path: String, extension: String },

    /// A rule expected a node that the model does not contain.
    #[error("no model node matched {matcher}")]
    MissingNode { matcher: NodeMatcher },

    /// Node has neither a bound nor an imported material.
    #[error("node `{node}` has no material to render with")]
    UnresolvedMaterial { node: String },

    /// Manifest colour is not a valid hex string.
    #[error("invalid colour `{value}` in scene manifest")]
    InvalidColour {
        value: String,
        #[source]
        source: HexColorError,
    },
}

pub type Result<T> = std::result::Result<T, SceneError>;
