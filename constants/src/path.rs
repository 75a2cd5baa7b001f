/// Scene manifest, relative to the asset root.
pub const MANIFEST_PATH: &str = "portal/manifest.json";

/// Baked lighting texture used when the manifest does not name one.
pub const DEFAULT_TEXTURE_PATH: &str = "portal/texture.jpg";

/// Model bundle used when the manifest does not name one.
pub const DEFAULT_MODEL_PATH: &str = "portal/portal.glb";

pub const PORTAL_VERTEX_SHADER: &str = "shaders/portal/vertex.wgsl";
pub const PORTAL_FRAGMENT_SHADER: &str = "shaders/portal/fragment.wgsl";

pub const FIREFLY_VERTEX_SHADER: &str = "shaders/fireflies/vertex.wgsl";
pub const FIREFLY_FRAGMENT_SHADER: &str = "shaders/fireflies/fragment.wgsl";
