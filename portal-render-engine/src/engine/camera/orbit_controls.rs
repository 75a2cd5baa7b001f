use std::f32::consts::{PI, TAU};

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::controls::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PAN_SPEED,
    ORBIT_ROTATE_SPEED, ORBIT_ZOOM_BASE, WHEEL_PIXELS_PER_LINE,
};

/// Keeps the polar angle strictly inside (0, pi).
const POLAR_EPSILON: f32 = 1e-4;

/// Damped orbit camera state.
///
/// Input accumulates pending rotation and pan; every `advance` applies a
/// `damping_factor` share of it and decays the rest, so motion eases out over
/// the following frames. Zoom is applied in full on the next advance.
#[derive(Component, Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z towards +X.
    pub azimuth: f32,
    /// Angle from +Y.
    pub polar: f32,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_pan: Vec3,
    pending_scale: f32,
}

impl OrbitControls {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length();
        let (azimuth, polar) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        Self {
            target,
            radius: radius.clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE),
            azimuth,
            polar: polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON),
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_pan: Vec3::ZERO,
            pending_scale: 1.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    pub fn camera_transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }

    /// Drag in logical pixels. A drag across the full viewport height turns a
    /// full circle.
    pub fn rotate(&mut self, drag: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.pending_azimuth -= TAU * drag.x / viewport_height * self.rotate_speed;
        self.pending_polar -= TAU * drag.y / viewport_height * self.rotate_speed;
    }

    /// Screen-space pan. The target moves so the scene follows the pointer at
    /// the target's depth.
    pub fn pan(&mut self, drag: Vec2, viewport_height: f32, fov: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let target_distance = self.radius * (fov / 2.0).tan();
        let left = 2.0 * drag.x * target_distance / viewport_height * self.pan_speed;
        let up = 2.0 * drag.y * target_distance / viewport_height * self.pan_speed;

        let transform = self.camera_transform();
        self.pending_pan += -*transform.right() * left + *transform.up() * up;
    }

    /// Positive steps move closer, each step by `ORBIT_ZOOM_BASE`.
    pub fn zoom(&mut self, steps: f32) {
        self.pending_scale *= ORBIT_ZOOM_BASE.powf(steps);
    }

    /// Scale the orbit radius by `ratio` (below 1 moves closer).
    pub fn zoom_by_ratio(&mut self, ratio: f32) {
        if ratio.is_finite() && ratio > 0.0 {
            self.pending_scale *= ratio;
        }
    }

    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.pending_azimuth.abs() < epsilon
            && self.pending_polar.abs() < epsilon
            && self.pending_pan.length() < epsilon
            && (self.pending_scale - 1.0).abs() < epsilon
    }

    /// Apply one frame of damped motion.
    pub fn advance(&mut self) {
        let damping = self.damping_factor;

        self.azimuth += self.pending_azimuth * damping;
        self.polar = (self.polar + self.pending_polar * damping)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.radius = (self.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pending_pan * damping;

        self.pending_azimuth *= 1.0 - damping;
        self.pending_polar *= 1.0 - damping;
        self.pending_pan *= 1.0 - damping;
        self.pending_scale = 1.0;
    }
}

/// Feed mouse, wheel and touch input into every orbit controller.
pub fn orbit_input_system(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut controls: Query<(&mut OrbitControls, &Projection)>,
) {
    let drag: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    let wheel_steps: f32 = mouse_wheel
        .read()
        .map(|wheel| match wheel.unit {
            MouseScrollUnit::Line => wheel.y,
            MouseScrollUnit::Pixel => wheel.y / WHEEL_PIXELS_PER_LINE,
        })
        .sum();

    let Ok(window) = windows.single() else {
        return;
    };
    let viewport_height = window.height();

    let active: Vec<_> = touches.iter().collect();

    for (mut orbit, projection) in &mut controls {
        let fov = match projection {
            Projection::Perspective(perspective) => perspective.fov,
            _ => continue,
        };

        if mouse_buttons.pressed(MouseButton::Left) {
            orbit.rotate(drag, viewport_height);
        } else if mouse_buttons.pressed(MouseButton::Right) {
            orbit.pan(drag, viewport_height, fov);
        }

        if wheel_steps != 0.0 {
            orbit.zoom(wheel_steps);
        }

        match active.as_slice() {
            [finger] => orbit.rotate(finger.delta(), viewport_height),
            [first, second] => {
                let midpoint_delta = (first.delta() + second.delta()) / 2.0;
                orbit.pan(midpoint_delta, viewport_height, fov);

                let previous = first.previous_position().distance(second.previous_position());
                let current = first.position().distance(second.position());
                if current > 0.0 {
                    orbit.zoom_by_ratio(previous / current);
                }
            }
            _ => {}
        }
    }
}

pub fn advance_orbit_controls(mut cameras: Query<(&mut OrbitControls, &mut Transform)>) {
    for (mut orbit, mut transform) in &mut cameras {
        orbit.advance();
        *transform = orbit.camera_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Vec3 = Vec3::new(4.0, 2.0, 4.0);

    fn start_controls() -> OrbitControls {
        OrbitControls::looking_at(START, Vec3::ZERO)
    }

    #[test]
    fn reproduces_start_position() {
        let orbit = start_controls();
        assert!(orbit.position().distance(START) < 1e-4);
        assert!(orbit.camera_transform().translation.distance(START) < 1e-4);
    }

    #[test]
    fn no_input_leaves_camera_still() {
        let mut orbit = start_controls();
        for _ in 0..10 {
            orbit.advance();
        }
        assert!(orbit.position().distance(START) < 1e-4);
        assert!(orbit.is_settled(1e-6));
    }

    #[test]
    fn damped_rotation_converges_to_full_delta() {
        let mut orbit = start_controls();
        let azimuth = orbit.azimuth;
        orbit.rotate(Vec2::new(-100.0, 0.0), 600.0);

        let mut previous = orbit.position();
        let mut last_step = f32::MAX;
        for _ in 0..400 {
            orbit.advance();
            let position = orbit.position();
            last_step = position.distance(previous);
            previous = position;
        }

        assert!(last_step < 1e-5);
        assert!(orbit.is_settled(1e-6));
        let expected = azimuth + TAU * 100.0 / 600.0;
        assert!((orbit.azimuth - expected).abs() < 1e-3);
    }

    #[test]
    fn first_advance_applies_damping_share() {
        let mut orbit = start_controls();
        let azimuth = orbit.azimuth;
        orbit.rotate(Vec2::new(-600.0, 0.0), 600.0);
        orbit.advance();
        assert!((orbit.azimuth - azimuth - TAU * 0.05).abs() < 1e-5);
    }

    #[test]
    fn polar_angle_stays_open() {
        let mut orbit = start_controls();
        orbit.rotate(Vec2::new(0.0, 100_000.0), 600.0);
        for _ in 0..200 {
            orbit.advance();
            assert!(orbit.polar > 0.0 && orbit.polar < PI);
        }

        orbit.rotate(Vec2::new(0.0, -200_000.0), 600.0);
        for _ in 0..200 {
            orbit.advance();
            assert!(orbit.polar > 0.0 && orbit.polar < PI);
        }
    }

    #[test]
    fn zoom_is_clamped() {
        let mut orbit = start_controls();
        orbit.zoom(500.0);
        orbit.advance();
        assert_eq!(orbit.radius, ORBIT_MIN_DISTANCE);

        orbit.zoom(-500.0);
        orbit.advance();
        assert_eq!(orbit.radius, ORBIT_MAX_DISTANCE);
    }

    #[test]
    fn wheel_step_scales_radius() {
        let mut orbit = start_controls();
        let radius = orbit.radius;
        orbit.zoom(1.0);
        orbit.advance();
        assert!((orbit.radius - radius * 0.95).abs() < 1e-5);
    }

    #[test]
    fn pan_moves_target_sideways() {
        let mut orbit = start_controls();
        orbit.pan(Vec2::new(50.0, 0.0), 600.0, 45f32.to_radians());
        for _ in 0..400 {
            orbit.advance();
        }

        let right = *orbit.camera_transform().right();
        assert!(orbit.target.dot(right) < 0.0);
        assert!(orbit.target.y.abs() < 1e-4);
    }
}
