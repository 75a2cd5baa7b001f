use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::mesh::{MeshVertexAttribute, MeshVertexBufferLayoutRef};
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType, SpecializedMeshPipelineError,
    VertexFormat,
};
use constants::particles::FIREFLY_BASE_SIZE;
use constants::path::{FIREFLY_FRAGMENT_SHADER, FIREFLY_VERTEX_SHADER};

/// Per-vertex particle scale, repeated on each quad corner.
pub const ATTRIBUTE_FIREFLY_SCALE: MeshVertexAttribute =
    MeshVertexAttribute::new("Firefly_Scale", 988_540_917, VertexFormat::Float32);

/// Per-vertex randomness seed, repeated on each quad corner.
pub const ATTRIBUTE_FIREFLY_RANDOMNESS: MeshVertexAttribute =
    MeshVertexAttribute::new("Firefly_Randomness", 988_540_918, VertexFormat::Float32);

/// Quad corner in [-1, 1], expanded to screen space by the vertex shader.
pub const ATTRIBUTE_FIREFLY_CORNER: MeshVertexAttribute =
    MeshVertexAttribute::new("Firefly_Corner", 988_540_919, VertexFormat::Float32x2);

#[derive(Debug, Clone, Copy, ShaderType)]
pub struct FireflyUniform {
    pub time: f32,
    pub pixel_ratio: f32,
    pub size: f32,
    pub _padding: f32,
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct FireflyMaterial {
    #[uniform(0)]
    pub uniforms: FireflyUniform,
}

impl FireflyMaterial {
    pub fn new(pixel_ratio: f32) -> Self {
        Self {
            uniforms: FireflyUniform {
                time: 0.0,
                pixel_ratio,
                size: FIREFLY_BASE_SIZE,
                _padding: 0.0,
            },
        }
    }
}

impl Material for FireflyMaterial {
    fn vertex_shader() -> ShaderRef {
        FIREFLY_VERTEX_SHADER.into()
    }

    fn fragment_shader() -> ShaderRef {
        FIREFLY_FRAGMENT_SHADER.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            ATTRIBUTE_FIREFLY_SCALE.at_shader_location(1),
            ATTRIBUTE_FIREFLY_RANDOMNESS.at_shader_location(2),
            ATTRIBUTE_FIREFLY_CORNER.at_shader_location(3),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];

        // Glow sprites overlap freely.
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        descriptor.primitive.cull_mode = None;

        Ok(())
    }
}
