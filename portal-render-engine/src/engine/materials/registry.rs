use bevy::prelude::*;
use constants::materials::POLE_LIGHT_COLOUR;

use crate::engine::assets::scene_manifest::{PortalSurface, parse_colour};
use crate::engine::error::Result;
use crate::engine::materials::portal_material::PortalMaterial;

/// Which registry material a scene node was bound to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialSlot {
    Baked,
    PoleLight,
    Portal,
    /// Kept the material that shipped with the model.
    Imported,
}

/// Portal surface as stored in asset storage.
#[derive(Debug, Clone, PartialEq)]
pub enum PortalSurfaceHandle {
    Flat(Handle<StandardMaterial>),
    Shader(Handle<PortalMaterial>),
}

/// Owner of the shared scene materials. Nodes reference these handles and
/// never own a material themselves.
#[derive(Resource, Debug, Clone)]
pub struct PortalMaterials {
    pub baked: Handle<StandardMaterial>,
    pub pole_light: Handle<StandardMaterial>,
    pub portal: PortalSurfaceHandle,
}

impl PortalMaterials {
    /// Build the three scene materials. Colours are validated before any
    /// asset is added, so a bad manifest leaves storage untouched.
    pub fn create(
        baked_texture: Handle<Image>,
        surface: &PortalSurface,
        standard_materials: &mut Assets<StandardMaterial>,
        portal_materials: &mut Assets<PortalMaterial>,
    ) -> Result<Self> {
        let pole_colour = parse_colour(POLE_LIGHT_COLOUR)?;
        let portal = match surface {
            PortalSurface::Flat { colour } => ResolvedSurface::Flat(parse_colour(colour)?),
            PortalSurface::Shader {
                colour_start,
                colour_end,
            } => ResolvedSurface::Shader(parse_colour(colour_start)?, parse_colour(colour_end)?),
        };

        let baked = standard_materials.add(StandardMaterial {
            base_color_texture: Some(baked_texture),
            unlit: true,
            ..default()
        });

        let pole_light = standard_materials.add(StandardMaterial {
            base_color: pole_colour,
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        });

        let portal = match portal {
            ResolvedSurface::Flat(colour) => {
                PortalSurfaceHandle::Flat(standard_materials.add(unlit_colour(colour)))
            }
            ResolvedSurface::Shader(start, end) => {
                PortalSurfaceHandle::Shader(portal_materials.add(PortalMaterial::new(start, end)))
            }
        };

        Ok(Self {
            baked,
            pole_light,
            portal,
        })
    }
}

enum ResolvedSurface {
    Flat(Color),
    Shader(Color, Color),
}

fn unlit_colour(colour: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: colour,
        unlit: true,
        ..default()
    }
}
