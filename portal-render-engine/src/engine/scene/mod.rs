//! Model node access and name-based material rules.

/// Flattened view of decoded glTF nodes with their primitives.
pub mod model_nodes;

/// Node matchers, assignment rules and the single-scan lookup.
pub mod node_match;
