use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::camera::{ClearColorConfig, RenderTarget};
use constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_POSITION, CAMERA_TARGET,
};

use crate::engine::camera::orbit_controls::OrbitControls;
use crate::engine::viewport::{RenderSurface, render_surface_image};

#[derive(Component)]
pub struct PortalCamera;

pub fn portal_projection() -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: CAMERA_FOV_DEGREES.to_radians(),
        near: CAMERA_NEAR,
        far: CAMERA_FAR,
        ..default()
    })
}

/// Perspective camera at the start position with orbit controls attached.
///
/// The camera draws into the offscreen `RenderSurface`, which the viewport
/// keeps at the capped drawing-buffer size. A second camera presents that
/// image across the full window. Baked colours are shown as authored, so
/// tonemapping is off on both.
pub fn spawn_portal_camera(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let controls = OrbitControls::looking_at(CAMERA_START_POSITION, CAMERA_TARGET);
    let surface = images.add(render_surface_image(UVec2::ONE));

    commands.spawn((
        Name::new("portal_camera"),
        PortalCamera,
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(surface.clone().into()),
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        portal_projection(),
        Tonemapping::None,
        Msaa::Sample4,
        controls.camera_transform(),
        controls,
    ));

    commands.spawn((
        Name::new("presentation_camera"),
        Camera2d,
        Camera {
            order: 1,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Tonemapping::None,
        Msaa::Off,
        IsDefaultUiCamera,
    ));

    commands.spawn((
        Name::new("portal_surface"),
        ImageNode::new(surface.clone()),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        ZIndex(-1),
    ));

    commands.insert_resource(RenderSurface { image: surface });
}
