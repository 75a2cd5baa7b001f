use std::collections::{HashMap, HashSet};

use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;

/// One drawable piece of a model node.
#[derive(Debug, Clone)]
pub struct ModelPrimitive {
    pub mesh: Handle<Mesh>,
    /// Material authored in the model, if any.
    pub material: Option<Handle<StandardMaterial>>,
}

/// Decoded model node with its primitives and child nodes resolved.
#[derive(Debug, Clone, Default)]
pub struct ModelNode {
    pub name: String,
    pub transform: Transform,
    pub primitives: Vec<ModelPrimitive>,
    pub children: Vec<ModelNode>,
}

impl ModelNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..default()
        }
    }
}

/// Top-level nodes of a loaded glTF bundle.
///
/// These are the root nodes of the default scene (or the first scene when
/// none is marked default). Bundles loaded without their source document
/// fall back to every node that no other node lists as a child.
pub fn collect_model_nodes(
    gltf: &Gltf,
    nodes: &Assets<GltfNode>,
    meshes: &Assets<GltfMesh>,
) -> Vec<ModelNode> {
    collect_top_level(default_scene_roots(gltf), &gltf.nodes, nodes, meshes)
}

fn collect_top_level(
    scene_roots: Option<Vec<usize>>,
    handles: &[Handle<GltfNode>],
    nodes: &Assets<GltfNode>,
    meshes: &Assets<GltfMesh>,
) -> Vec<ModelNode> {
    let by_index: HashMap<usize, &Handle<GltfNode>> = handles
        .iter()
        .filter_map(|handle| nodes.get(handle).map(|node| (node.index, handle)))
        .collect();

    let child_indices: HashSet<usize> = handles
        .iter()
        .filter_map(|handle| nodes.get(handle))
        .flat_map(|node| node.children.iter())
        .filter_map(|child| nodes.get(child).map(|node| node.index))
        .collect();

    let mut file_order: Vec<usize> = by_index.keys().copied().collect();
    file_order.sort_unstable();

    top_level_indices(scene_roots, &file_order, &child_indices)
        .into_iter()
        .filter_map(|index| by_index.get(&index))
        .filter_map(|handle| resolve_node(handle, nodes, meshes))
        .collect()
}

fn default_scene_roots(gltf: &Gltf) -> Option<Vec<usize>> {
    let document = gltf.source.as_ref()?;
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())?;
    Some(scene.nodes().map(|node| node.index()).collect())
}

/// Node indices to treat as top level, in scene order.
fn top_level_indices(
    scene_roots: Option<Vec<usize>>,
    file_order: &[usize],
    child_indices: &HashSet<usize>,
) -> Vec<usize> {
    match scene_roots {
        Some(roots) => roots,
        None => file_order
            .iter()
            .copied()
            .filter(|index| !child_indices.contains(index))
            .collect(),
    }
}

fn resolve_node(
    handle: &Handle<GltfNode>,
    nodes: &Assets<GltfNode>,
    meshes: &Assets<GltfMesh>,
) -> Option<ModelNode> {
    let node = nodes.get(handle)?;

    let primitives = node
        .mesh
        .as_ref()
        .and_then(|mesh| meshes.get(mesh))
        .map(|mesh| {
            mesh.primitives
                .iter()
                .map(|primitive| ModelPrimitive {
                    mesh: primitive.mesh.clone(),
                    material: primitive.material.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    let children = node
        .children
        .iter()
        .filter_map(|child| resolve_node(child, nodes, meshes))
        .collect();

    Some(ModelNode {
        name: node.name.clone(),
        transform: node.transform,
        primitives,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_roots_win_over_unparented_nodes() {
        // Node 4 is unparented but belongs to no scene.
        let children = HashSet::from([1, 2]);
        let roots = top_level_indices(Some(vec![3, 0]), &[0, 1, 2, 3, 4], &children);
        assert_eq!(roots, [3, 0]);
    }

    #[test]
    fn without_source_unparented_nodes_are_roots() {
        let children = HashSet::from([1, 2]);
        let roots = top_level_indices(None, &[0, 1, 2, 3, 4], &children);
        assert_eq!(roots, [0, 3, 4]);
    }

    #[test]
    fn empty_scene_has_no_roots() {
        let roots = top_level_indices(Some(Vec::new()), &[0, 1], &HashSet::new());
        assert!(roots.is_empty());
    }

    #[test]
    fn scene_roots_resolve_with_children() {
        let mut nodes = Assets::<GltfNode>::default();
        let meshes = Assets::<GltfMesh>::default();

        let child = nodes.add(gltf_node(1, "portalLight", Vec::new()));
        let root = nodes.add(gltf_node(0, "baked", vec![child.clone()]));
        let stray = nodes.add(gltf_node(2, "poleLightA", Vec::new()));
        let handles = [root, child, stray];

        let tree = collect_top_level(Some(vec![0]), &handles, &nodes, &meshes);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "baked");
        assert_eq!(tree[0].children[0].name, "portalLight");

        let fallback = collect_top_level(None, &handles, &nodes, &meshes);
        let names: Vec<_> = fallback.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(names, ["baked", "poleLightA"]);
    }

    fn gltf_node(index: usize, name: &str, children: Vec<Handle<GltfNode>>) -> GltfNode {
        GltfNode {
            index,
            name: name.to_string(),
            children,
            mesh: None,
            skin: None,
            transform: Transform::IDENTITY,
            is_animation_root: false,
            extras: None,
        }
    }
}
