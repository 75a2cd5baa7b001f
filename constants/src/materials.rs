/// Node receiving the baked texture, matched by exact name.
pub const BAKED_NODE_NAME: &str = "baked";

/// Substring identifying pole light nodes.
pub const POLE_NODE_PATTERN: &str = "pole";

/// Substring identifying the portal surface node.
pub const PORTAL_NODE_PATTERN: &str = "portal";

pub const POLE_LIGHT_COLOUR: &str = "#ffffe5";

/// Flat portal colour, also the default portal surface.
pub const PORTAL_FLAT_COLOUR: &str = "#cccce5";

pub const PORTAL_COLOUR_START: &str = "#b91fac";
pub const PORTAL_COLOUR_END: &str = "#ffebf3";
