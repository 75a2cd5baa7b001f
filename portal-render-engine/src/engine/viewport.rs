use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};
use bevy::window::{PrimaryWindow, WindowBackendScaleFactorChanged, WindowResized};
use constants::render_settings::MAX_PIXEL_RATIO;

use crate::engine::camera::portal_camera::PortalCamera;
use crate::engine::materials::firefly_material::FireflyMaterial;

/// Logical window size and the capped device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl ViewportMetrics {
    /// `None` while the window has no area to render into.
    pub fn measure(width: f32, height: f32, device_pixel_ratio: f32) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixel_ratio: device_pixel_ratio.clamp(f32::MIN_POSITIVE, MAX_PIXEL_RATIO),
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Size of the drawing buffer in physical pixels.
    pub fn render_resolution(&self) -> UVec2 {
        (Vec2::new(self.width, self.height) * self.pixel_ratio)
            .round()
            .as_uvec2()
    }
}

#[derive(Resource, Debug, Default)]
pub struct ViewportState {
    pub metrics: Option<ViewportMetrics>,
}

/// Offscreen colour target the portal camera draws into. It is sized to the
/// capped drawing buffer and stretched over the whole window, so the window
/// itself is never resized.
#[derive(Resource, Debug, Clone)]
pub struct RenderSurface {
    pub image: Handle<Image>,
}

pub fn render_surface_image(size: UVec2) -> Image {
    let mut image = Image::new_fill(
        surface_extent(size),
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Bgra8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING
        | TextureUsages::COPY_DST
        | TextureUsages::RENDER_ATTACHMENT;
    image
}

fn surface_extent(size: UVec2) -> Extent3d {
    let size = size.max(UVec2::ONE);
    Extent3d {
        width: size.x,
        height: size.y,
        depth_or_array_layers: 1,
    }
}

/// Re-measure the window on resize or scale changes, then update camera
/// aspect, render resolution and the firefly pixel ratio together.
pub fn handle_viewport_resize(
    mut resized: EventReader<WindowResized>,
    mut rescaled: EventReader<WindowBackendScaleFactorChanged>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportState>,
    mut projections: Query<&mut Projection, With<PortalCamera>>,
    surface: Option<Res<RenderSurface>>,
    mut images: ResMut<Assets<Image>>,
    mut firefly_materials: ResMut<Assets<FireflyMaterial>>,
) {
    let signalled = resized.read().count() + rescaled.read().count() > 0;
    if !signalled && viewport.metrics.is_some() {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };

    let Some(metrics) = ViewportMetrics::measure(
        window.width(),
        window.height(),
        window.resolution.scale_factor(),
    ) else {
        debug!("Viewport has no area yet, skipping resize");
        return;
    };

    let surface_image = surface
        .as_ref()
        .and_then(|surface| images.get_mut(&surface.image));

    apply_viewport_metrics(
        metrics,
        &mut viewport,
        projections.iter_mut(),
        surface_image,
        &mut firefly_materials,
    );
}

pub fn apply_viewport_metrics<'a>(
    metrics: ViewportMetrics,
    viewport: &mut ViewportState,
    projections: impl Iterator<Item = Mut<'a, Projection>>,
    surface_image: Option<&mut Image>,
    firefly_materials: &mut Assets<FireflyMaterial>,
) {
    for mut projection in projections {
        if let Projection::Perspective(perspective) = &mut *projection {
            perspective.aspect_ratio = metrics.aspect_ratio();
        }
    }

    let resolution = metrics.render_resolution().max(UVec2::ONE);
    if let Some(image) = surface_image {
        if image.size() != resolution {
            image.resize(surface_extent(resolution));
        }
    }

    for (_, material) in firefly_materials.iter_mut() {
        material.uniforms.pixel_ratio = metrics.pixel_ratio;
    }

    if viewport.metrics != Some(metrics) {
        debug!(
            "Viewport {}x{} @ {}x, drawing buffer {}x{}",
            metrics.width, metrics.height, metrics.pixel_ratio, resolution.x, resolution.y
        );
    }
    viewport.metrics = Some(metrics);
}

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportState>()
            .add_event::<WindowResized>()
            .add_event::<WindowBackendScaleFactorChanged>()
            .add_systems(Update, handle_viewport_resize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::portal_camera::portal_projection;
    use bevy::window::WindowResolution;

    fn window(physical: (f32, f32), device_ratio: f32) -> Window {
        let mut resolution = WindowResolution::new(physical.0, physical.1);
        resolution.set_scale_factor(device_ratio);
        Window {
            resolution,
            ..default()
        }
    }

    fn test_app(window: Window) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Image>()
            .init_asset::<FireflyMaterial>()
            .add_plugins(ViewportPlugin);
        let image = app
            .world_mut()
            .resource_mut::<Assets<Image>>()
            .add(render_surface_image(UVec2::ONE));
        app.insert_resource(RenderSurface { image });
        app.world_mut().spawn((window, PrimaryWindow));
        app.world_mut().spawn((PortalCamera, portal_projection()));
        app
    }

    fn camera_aspect(app: &mut App) -> f32 {
        let mut query = app
            .world_mut()
            .query_filtered::<&Projection, With<PortalCamera>>();
        match query.single(app.world()) {
            Ok(Projection::Perspective(perspective)) => perspective.aspect_ratio,
            _ => panic!("portal camera missing"),
        }
    }

    fn surface_size(app: &App) -> UVec2 {
        let surface = app.world().resource::<RenderSurface>();
        app.world()
            .resource::<Assets<Image>>()
            .get(&surface.image)
            .unwrap()
            .size()
    }

    fn primary_window(app: &mut App) -> Window {
        let mut windows = app.world_mut().query::<&Window>();
        windows.single(app.world()).unwrap().clone()
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let metrics = ViewportMetrics::measure(800.0, 600.0, 3.0).unwrap();
        assert_eq!(metrics.pixel_ratio, 2.0);
        assert_eq!(metrics.render_resolution(), UVec2::new(1600, 1200));
        assert!((metrics.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn low_density_ratio_is_kept() {
        let metrics = ViewportMetrics::measure(1280.0, 720.0, 1.0).unwrap();
        assert_eq!(metrics.pixel_ratio, 1.0);
        assert_eq!(metrics.render_resolution(), UVec2::new(1280, 720));
    }

    #[test]
    fn empty_window_is_skipped() {
        assert!(ViewportMetrics::measure(0.0, 600.0, 1.0).is_none());
        assert!(ViewportMetrics::measure(800.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn first_frame_measures_window() {
        let mut app = test_app(window((1600.0, 900.0), 1.0));
        app.update();

        let metrics = app.world().resource::<ViewportState>().metrics.unwrap();
        assert_eq!(metrics.width, 1600.0);
        assert_eq!(metrics.height, 900.0);
        assert!((camera_aspect(&mut app) - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(surface_size(&app), UVec2::new(1600, 900));
    }

    #[test]
    fn resize_updates_firefly_pixel_ratio() {
        let mut app = test_app(window((1200.0, 900.0), 3.0));
        let material = app
            .world_mut()
            .resource_mut::<Assets<FireflyMaterial>>()
            .add(FireflyMaterial::new(1.0));
        app.update();

        let materials = app.world().resource::<Assets<FireflyMaterial>>();
        assert_eq!(materials.get(&material).unwrap().uniforms.pixel_ratio, 2.0);
    }

    #[test]
    fn capped_ratio_shrinks_surface_not_window() {
        let mut app = test_app(window((1200.0, 900.0), 3.0));
        app.update();

        let window = primary_window(&mut app);
        assert_eq!(window.resolution.physical_width(), 1200);
        assert_eq!(window.resolution.physical_height(), 900);
        assert_eq!(window.resolution.scale_factor_override(), None);
        assert_eq!(window.width(), 400.0);

        // 400x300 logical at the capped ratio of two.
        assert_eq!(surface_size(&app), UVec2::new(800, 600));
    }

    #[test]
    fn window_resize_follows_into_surface() {
        let mut app = test_app(window((1200.0, 900.0), 3.0));
        app.update();

        let entity = {
            let mut windows = app
                .world_mut()
                .query_filtered::<(Entity, &mut Window), With<PrimaryWindow>>();
            let (entity, mut window) = windows.single_mut(app.world_mut()).unwrap();
            window.resolution.set_physical_resolution(1800, 600);
            entity
        };
        app.world_mut().send_event(WindowResized {
            window: entity,
            width: 600.0,
            height: 200.0,
        });
        app.update();

        let window = primary_window(&mut app);
        assert_eq!(window.resolution.physical_width(), 1800);
        assert_eq!(window.resolution.physical_height(), 600);
        assert!((camera_aspect(&mut app) - 3.0).abs() < 1e-6);
        assert_eq!(surface_size(&app), UVec2::new(1200, 400));
    }

    #[test]
    fn applying_same_metrics_twice_is_idempotent() {
        let metrics = ViewportMetrics::measure(1024.0, 768.0, 1.5).unwrap();
        let mut viewport = ViewportState::default();
        let mut image = render_surface_image(UVec2::ONE);
        let mut materials = Assets::<FireflyMaterial>::default();
        let handle = materials.add(FireflyMaterial::new(1.0));

        apply_viewport_metrics(
            metrics,
            &mut viewport,
            std::iter::empty::<Mut<Projection>>(),
            Some(&mut image),
            &mut materials,
        );
        let first = (viewport.metrics, image.size());
        apply_viewport_metrics(
            metrics,
            &mut viewport,
            std::iter::empty::<Mut<Projection>>(),
            Some(&mut image),
            &mut materials,
        );

        assert_eq!(first, (viewport.metrics, image.size()));
        assert_eq!(image.size(), UVec2::new(1536, 1152));
        assert_eq!(materials.get(&handle).unwrap().uniforms.pixel_ratio, 1.5);
    }
}
