use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

/// Loading gates scene population only; the render loop runs in every state.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Ready,
    /// An asset failed to load. The scene stays empty.
    Unavailable,
}

pub fn transition_to_ready(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.scene_assembled {
        info!("→ Transitioning to Ready state");
        next_state.set(AppState::Ready);
    }
}

pub fn transition_to_unavailable(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.has_failed() {
        warn!("→ Transitioning to Unavailable state, rendering an empty scene");
        next_state.set(AppState::Unavailable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::orbit_controls::OrbitControls;
    use crate::engine::error::SceneError;
    use crate::engine::materials::firefly_material::FireflyMaterial;
    use crate::engine::materials::portal_material::PortalMaterial;
    use crate::engine::render_loop::RenderLoopPlugin;
    use bevy::state::app::StatesPlugin;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, AssetPlugin::default()))
            .init_asset::<PortalMaterial>()
            .init_asset::<FireflyMaterial>()
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .add_plugins(RenderLoopPlugin)
            .add_systems(
                Update,
                (transition_to_ready, transition_to_unavailable)
                    .run_if(in_state(AppState::Loading)),
            );
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn stays_loading_while_assets_pending() {
        let mut app = test_app();
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Loading);
    }

    #[test]
    fn assembled_scene_is_ready() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .scene_assembled = true;
        app.update();
        app.update();
        assert_eq!(state(&app), AppState::Ready);
    }

    #[test]
    fn failed_load_keeps_controls_running() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .fail(SceneError::AssetLoad {
                path: "portal/portal.glb".to_string(),
                reason: "unsupported extension".to_string(),
            });

        let mut orbit = OrbitControls::looking_at(Vec3::new(4.0, 2.0, 4.0), Vec3::ZERO);
        orbit.zoom(3.0);
        let start = orbit.camera_transform();
        let camera = app.world_mut().spawn((orbit, start)).id();

        app.update();
        app.update();

        assert_eq!(state(&app), AppState::Unavailable);
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!(transform.translation.length() < start.translation.length());
    }
}
