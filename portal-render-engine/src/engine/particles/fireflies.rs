use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::view::NoFrustumCulling;
use constants::particles::{
    FIREFLY_COUNT, FIREFLY_HALF_EXTENT, FIREFLY_MAX_HEIGHT, FIREFLY_MIN_HEIGHT,
};
use rand::Rng;

use crate::engine::materials::firefly_material::{
    ATTRIBUTE_FIREFLY_CORNER, ATTRIBUTE_FIREFLY_RANDOMNESS, ATTRIBUTE_FIREFLY_SCALE,
    FireflyMaterial,
};

/// Quad corners in the order the index buffer expects.
const QUAD_CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

#[derive(Component)]
pub struct Fireflies;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Firefly {
    pub position: Vec3,
    /// Size multiplier in [0, 1).
    pub scale: f32,
    /// Phase seed in [0, 1).
    pub randomness: f32,
}

/// Immutable set of fireflies, generated once.
#[derive(Debug, Clone)]
pub struct FireflyBuffer {
    fireflies: Vec<Firefly>,
}

impl FireflyBuffer {
    pub fn generate<R: Rng>(rng: &mut R, count: usize) -> Self {
        let fireflies = (0..count)
            .map(|_| Firefly {
                position: Vec3::new(
                    rng.gen_range(-FIREFLY_HALF_EXTENT..=FIREFLY_HALF_EXTENT),
                    rng.gen_range(FIREFLY_MIN_HEIGHT..=FIREFLY_MAX_HEIGHT),
                    rng.gen_range(-FIREFLY_HALF_EXTENT..=FIREFLY_HALF_EXTENT),
                ),
                scale: rng.gen_range(0.0..1.0),
                randomness: rng.gen_range(0.0..1.0),
            })
            .collect();

        Self { fireflies }
    }

    pub fn fireflies(&self) -> &[Firefly] {
        &self.fireflies
    }

    pub fn len(&self) -> usize {
        self.fireflies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fireflies.is_empty()
    }

    /// One quad per firefly. Each corner carries the particle centre and
    /// attributes; the vertex shader moves it out to screen space.
    pub fn to_mesh(&self) -> Mesh {
        let vertex_count = self.fireflies.len() * QUAD_CORNERS.len();
        let mut positions = Vec::with_capacity(vertex_count);
        let mut scales = Vec::with_capacity(vertex_count);
        let mut randomness = Vec::with_capacity(vertex_count);
        let mut corners = Vec::with_capacity(vertex_count);
        let mut indices = Vec::with_capacity(self.fireflies.len() * QUAD_INDICES.len());

        for (quad, firefly) in self.fireflies.iter().enumerate() {
            let base = (quad * QUAD_CORNERS.len()) as u32;
            for corner in QUAD_CORNERS {
                positions.push(firefly.position.to_array());
                scales.push(firefly.scale);
                randomness.push(firefly.randomness);
                corners.push(corner);
            }
            indices.extend(QUAD_INDICES.iter().map(|index| base + index));
        }

        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
            .with_inserted_attribute(ATTRIBUTE_FIREFLY_SCALE, scales)
            .with_inserted_attribute(ATTRIBUTE_FIREFLY_RANDOMNESS, randomness)
            .with_inserted_attribute(ATTRIBUTE_FIREFLY_CORNER, corners)
            .with_inserted_indices(Indices::U32(indices))
    }
}

pub fn spawn_fireflies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<FireflyMaterial>>,
) {
    let buffer = FireflyBuffer::generate(&mut rand::thread_rng(), FIREFLY_COUNT);
    // Pixel ratio is set by the viewport on the first frame.
    let material = materials.add(FireflyMaterial::new(1.0));

    commands.spawn((
        Name::new("fireflies"),
        Fireflies,
        Mesh3d(meshes.add(buffer.to_mesh())),
        MeshMaterial3d(material),
        Transform::default(),
        // Quads are expanded on the GPU, CPU bounds only cover the centres.
        NoFrustumCulling,
    ));

    debug!("Spawned {} fireflies", buffer.len());
}
