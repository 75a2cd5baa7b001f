use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;

use crate::engine::assets::portal_assets::PortalAssets;
use crate::engine::assets::scene_manifest::{PortalSurface, SceneManifest};
use crate::engine::error::SceneError;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::materials::portal_material::PortalMaterial;
use crate::engine::materials::registry::{MaterialSlot, PortalMaterials, PortalSurfaceHandle};
use crate::engine::scene::model_nodes::{ModelNode, collect_model_nodes};
use crate::engine::scene::node_match::{AssignmentPlan, PORTAL_SCENE_RULES, plan_assignments};

/// Root of the assembled portal scene. Every model node is a descendant.
#[derive(Component)]
pub struct PortalScene;

#[derive(Debug, Default)]
pub struct AssemblyReport {
    pub root: Option<Entity>,
    pub spawned_nodes: usize,
    /// Recoverable problems; the affected bindings were skipped.
    pub problems: Vec<SceneError>,
}

#[derive(Debug, Clone)]
enum BoundMaterial {
    Standard(Handle<StandardMaterial>),
    Portal(Handle<PortalMaterial>),
}

struct PrimitiveSpawn {
    mesh: Handle<Mesh>,
    material: BoundMaterial,
}

struct NodeSpawn {
    name: String,
    transform: Transform,
    slot: MaterialSlot,
    primitives: Vec<PrimitiveSpawn>,
    children: Vec<NodeSpawn>,
}

impl NodeSpawn {
    fn node_count(&self) -> usize {
        1 + self.children.iter().map(NodeSpawn::node_count).sum::<usize>()
    }
}

pub fn assemble_scene_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    assets: Option<Res<PortalAssets>>,
    manifest: Option<Res<SceneManifest>>,
    gltfs: Res<Assets<Gltf>>,
    gltf_nodes: Res<Assets<GltfNode>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    mut portal_materials: ResMut<Assets<PortalMaterial>>,
) {
    if loading_progress.scene_assembled
        || loading_progress.has_failed()
        || !loading_progress.texture_configured
        || !loading_progress.model_loaded
    {
        return;
    }

    let (Some(assets), Some(manifest)) = (assets, manifest) else {
        return;
    };
    let Some(gltf) = gltfs.get(&assets.model) else {
        return;
    };

    let materials = match PortalMaterials::create(
        assets.baked_texture.clone(),
        &manifest.portal,
        &mut standard_materials,
        &mut portal_materials,
    ) {
        Ok(materials) => materials,
        Err(error) => {
            warn!("{error}, falling back to the flat portal surface");
            match PortalMaterials::create(
                assets.baked_texture.clone(),
                &PortalSurface::default(),
                &mut standard_materials,
                &mut portal_materials,
            ) {
                Ok(materials) => materials,
                Err(error) => {
                    loading_progress.fail(error);
                    return;
                }
            }
        }
    };

    let nodes = collect_model_nodes(gltf, &gltf_nodes, &gltf_meshes);
    let report = spawn_portal_scene(&mut commands, &nodes, &materials);
    for problem in &report.problems {
        warn!("{problem}");
    }

    info!(
        "✓ Portal scene assembled: {} nodes, {} skipped bindings",
        report.spawned_nodes,
        report.problems.len()
    );
    commands.insert_resource(materials);
    loading_progress.scene_assembled = true;
}

/// Bind registry materials to the model's top-level nodes and insert the
/// whole tree under a single root.
///
/// Materials are resolved for every node before anything is queued, and the
/// tree goes into one command batch, so the scene appears fully bound in a
/// single frame.
pub fn spawn_portal_scene(
    commands: &mut Commands,
    nodes: &[ModelNode],
    materials: &PortalMaterials,
) -> AssemblyReport {
    let names: Vec<&str> = nodes.iter().map(|node| node.name.as_str()).collect();
    let AssignmentPlan {
        slots,
        missing: mut problems,
    } = plan_assignments(&names, &PORTAL_SCENE_RULES);

    let spawns: Vec<NodeSpawn> = nodes
        .iter()
        .zip(slots)
        .filter_map(|(node, slot)| resolve_node(node, slot, materials, &mut problems))
        .collect();
    let spawned_nodes = spawns.iter().map(NodeSpawn::node_count).sum();

    let root = commands
        .spawn((
            Name::new("portal_scene"),
            PortalScene,
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for node in spawns {
                spawn_node(parent, node);
            }
        })
        .id();

    AssemblyReport {
        root: Some(root),
        spawned_nodes,
        problems,
    }
}

fn slot_material(materials: &PortalMaterials, slot: MaterialSlot) -> Option<BoundMaterial> {
    match slot {
        MaterialSlot::Baked => Some(BoundMaterial::Standard(materials.baked.clone())),
        MaterialSlot::PoleLight => Some(BoundMaterial::Standard(materials.pole_light.clone())),
        MaterialSlot::Portal => Some(match &materials.portal {
            PortalSurfaceHandle::Flat(handle) => BoundMaterial::Standard(handle.clone()),
            PortalSurfaceHandle::Shader(handle) => BoundMaterial::Portal(handle.clone()),
        }),
        MaterialSlot::Imported => None,
    }
}

// Descendants always keep their imported materials
fn resolve_node(
    node: &ModelNode,
    slot: MaterialSlot,
    materials: &PortalMaterials,
    problems: &mut Vec<SceneError>,
) -> Option<NodeSpawn> {
    let bound = slot_material(materials, slot);

    let mut primitives = Vec::with_capacity(node.primitives.len());
    for primitive in &node.primitives {
        let material = match (&bound, &primitive.material) {
            (Some(bound), _) => bound.clone(),
            (None, Some(imported)) => BoundMaterial::Standard(imported.clone()),
            (None, None) => {
                problems.push(SceneError::UnresolvedMaterial {
                    node: node.name.clone(),
                });
                return None;
            }
        };
        primitives.push(PrimitiveSpawn {
            mesh: primitive.mesh.clone(),
            material,
        });
    }

    let children = node
        .children
        .iter()
        .filter_map(|child| resolve_node(child, MaterialSlot::Imported, materials, problems))
        .collect();

    Some(NodeSpawn {
        name: node.name.clone(),
        transform: node.transform,
        slot,
        primitives,
        children,
    })
}

fn spawn_node(parent: &mut ChildSpawnerCommands, node: NodeSpawn) {
    let NodeSpawn {
        name,
        transform,
        slot,
        primitives,
        children,
    } = node;

    parent
        .spawn((Name::new(name), transform, Visibility::default(), slot))
        .with_children(|node_parent| {
            for primitive in primitives {
                let mesh = Mesh3d(primitive.mesh);
                match primitive.material {
                    BoundMaterial::Standard(handle) => {
                        node_parent.spawn((mesh, MeshMaterial3d(handle), slot));
                    }
                    BoundMaterial::Portal(handle) => {
                        node_parent.spawn((mesh, MeshMaterial3d(handle), slot));
                    }
                }
            }
            for child in children {
                spawn_node(node_parent, child);
            }
        });
}
