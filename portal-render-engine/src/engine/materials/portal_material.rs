use bevy::color::ColorToComponents;
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::render_resource::{AsBindGroup, ShaderRef, ShaderType};
use constants::path::{PORTAL_FRAGMENT_SHADER, PORTAL_VERTEX_SHADER};

#[derive(Debug, Clone, Copy, ShaderType)]
pub struct PortalUniform {
    pub colour_start: Vec4,
    pub colour_end: Vec4,
    pub time: f32,
}

/// Portal surface blending two colours through animated Perlin noise.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PortalMaterial {
    #[uniform(0)]
    pub uniforms: PortalUniform,
}

impl PortalMaterial {
    pub fn new(colour_start: Color, colour_end: Color) -> Self {
        Self {
            uniforms: PortalUniform {
                colour_start: colour_start.to_linear().to_vec4(),
                colour_end: colour_end.to_linear().to_vec4(),
                time: 0.0,
            },
        }
    }
}

impl Material for PortalMaterial {
    fn vertex_shader() -> ShaderRef {
        PORTAL_VERTEX_SHADER.into()
    }

    fn fragment_shader() -> ShaderRef {
        PORTAL_FRAGMENT_SHADER.into()
    }
}
