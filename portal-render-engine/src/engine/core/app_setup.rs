use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::orbit_controls::orbit_input_system;
use crate::engine::camera::portal_camera::spawn_portal_camera;
use crate::engine::core::app_state::{AppState, transition_to_ready, transition_to_unavailable};
use crate::engine::core::window_config::create_window_config;
use crate::engine::materials::firefly_material::FireflyMaterial;
use crate::engine::materials::portal_material::PortalMaterial;
use crate::engine::particles::fireflies::spawn_fireflies;
use crate::engine::render_loop::{RenderLoopPlugin, RenderLoopSet};
use crate::engine::systems::fps_tracking::fps_log_system;
use crate::engine::viewport::ViewportPlugin;

// Loading
use crate::engine::loading::asset_loader::check_asset_loading;
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_assembly::assemble_scene_when_ready;
use crate::engine::loading::texture_config::configure_loaded_textures;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{create_native_overlays, fps_text_update_system};

const LOG_FILTER: &str = "info,wgpu=error,naga=warn,portal_render_engine=debug";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MaterialPlugin::<PortalMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        })
        .add_plugins(MaterialPlugin::<FireflyMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        })
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers SceneManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SceneManifest>::new(&["json"]))
        .add_plugins((ViewportPlugin, RenderLoopPlugin))
        .insert_resource(ClearColor(Color::BLACK));

    app.add_systems(Startup, (spawn_portal_camera, spawn_fireflies).chain());
    add_scene_loading(&mut app);

    // Runtime systems that run in every state.
    app.add_systems(
        Update,
        (
            orbit_input_system.before(RenderLoopSet::AdvanceControls),
            fps_log_system,
        ),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, create_native_overlays)
            .add_systems(Update, fps_text_update_system);
    }

    app
}

/// Staged scene loading: manifest, assets, texture configuration, assembly,
/// then the transition out of `AppState::Loading`.
pub fn add_scene_loading(app: &mut App) {
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .add_systems(Startup, start_loading)
        .add_systems(
            Update,
            (
                load_manifest_system,
                check_asset_loading,
                configure_loaded_textures,
                assemble_scene_when_ready,
                transition_to_ready,
                transition_to_unavailable,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        );
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        level: Level::INFO,
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
