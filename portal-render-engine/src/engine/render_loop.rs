use bevy::prelude::*;

use crate::engine::camera::orbit_controls::advance_orbit_controls;
use crate::engine::materials::firefly_material::FireflyMaterial;
use crate::engine::materials::portal_material::PortalMaterial;

/// Per-tick work ahead of rendering, in order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderLoopSet {
    SampleClock,
    PushUniforms,
    AdvanceControls,
}

/// Elapsed time sampled once at the start of each tick.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameClock {
    pub elapsed: f32,
    pub frame: u64,
}

pub fn sample_frame_clock(time: Res<Time>, mut clock: ResMut<FrameClock>) {
    clock.elapsed = time.elapsed_secs();
    clock.frame += 1;
}

/// Write the sampled time into every shader-driven material.
pub fn push_elapsed_time(
    clock: Res<FrameClock>,
    mut portal_materials: ResMut<Assets<PortalMaterial>>,
    mut firefly_materials: ResMut<Assets<FireflyMaterial>>,
) {
    for (_, material) in portal_materials.iter_mut() {
        material.uniforms.time = clock.elapsed;
    }
    for (_, material) in firefly_materials.iter_mut() {
        material.uniforms.time = clock.elapsed;
    }
}

/// Runs in every app state so controls keep working on a degraded scene.
pub struct RenderLoopPlugin;

impl Plugin for RenderLoopPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameClock>()
            .configure_sets(
                Update,
                (
                    RenderLoopSet::SampleClock,
                    RenderLoopSet::PushUniforms,
                    RenderLoopSet::AdvanceControls,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    sample_frame_clock.in_set(RenderLoopSet::SampleClock),
                    push_elapsed_time.in_set(RenderLoopSet::PushUniforms),
                    advance_orbit_controls.in_set(RenderLoopSet::AdvanceControls),
                ),
            );
    }
}
