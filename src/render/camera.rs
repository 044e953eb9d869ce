//! Camera Controller: damped flights between hierarchy levels.
//!
//! The target is derived from the hierarchy level and the active node; the
//! camera never jumps to it. Each frame the position closes a fixed fraction
//! `1 - e^(-k·dt)` of the remaining gap (no overshoot), and the view basis is
//! rebuilt from the look-at point every frame, idle or not.

use glam::{Quat, Vec2, Vec3};

use crate::config::SceneConfig;
use crate::fast_math::{damp_factor, safe_normalize};
use crate::navigation::HierarchyLevel;

/// Where the camera wants to be. Compared by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraTarget {
    pub fn root(config: &SceneConfig) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, config.root_distance),
            look_at: Vec3::ZERO,
        }
    }

    /// Target for `level`, hovering just outside `active` (the active node's
    /// position). A missing or degenerate position falls back to the root view.
    pub fn for_level(level: HierarchyLevel, active: Option<Vec3>, config: &SceneConfig) -> Self {
        let distance = match level {
            HierarchyLevel::Root => return Self::root(config),
            HierarchyLevel::Category => config.category_distance,
            HierarchyLevel::Editor => config.editor_distance,
        };
        match active.and_then(safe_normalize) {
            Some(dir) => Self {
                position: dir * distance,
                look_at: Vec3::ZERO,
            },
            None => Self::root(config),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    Idle,
    Animating,
}

/// Camera pose for one frame: eye plus orthonormal basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// tan(fov_y / 2)
    pub fov_factor: f32,
}

impl CameraView {
    pub fn look_at(eye: Vec3, target: Vec3, fov_deg: f32) -> Self {
        let forward = safe_normalize(target - eye).unwrap_or(Vec3::NEG_Z);
        // Looking straight up/down: borrow Z as the reference up axis
        let world_up = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let right = forward.cross(world_up).normalize();
        let up = right.cross(forward);
        let fov_factor = (fov_deg.to_radians() * 0.5).tan();
        Self {
            eye,
            forward,
            right,
            up,
            fov_factor,
        }
    }

    /// Perspective-project a world point into a viewport of `size` pixels
    /// (origin top-left). `None` when the point is behind the camera.
    pub fn project(&self, point: Vec3, size: Vec2) -> Option<Vec2> {
        let rel = point - self.eye;
        let depth = rel.dot(self.forward);
        if depth <= 1e-4 || !depth.is_finite() {
            return None;
        }
        let aspect = size.x / size.y.max(1.0);
        let ndc_x = rel.dot(self.right) / (depth * self.fov_factor * aspect);
        let ndc_y = rel.dot(self.up) / (depth * self.fov_factor);
        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * size.x,
            (1.0 - ndc_y) * 0.5 * size.y,
        ))
    }

    /// Distance along the view axis; used for depth sorting and sizing.
    pub fn depth_of(&self, point: Vec3) -> f32 {
        (point - self.eye).dot(self.forward)
    }
}

/// Owns the camera pose and its animation state.
#[derive(Debug, Clone)]
pub struct CameraController {
    position: Vec3,
    look_at: Vec3,
    target: Option<CameraTarget>,
    state: CameraState,
    damping: f32,
    epsilon: f32,
    fov_deg: f32,
    min_distance: f32,
    max_distance: f32,
}

impl CameraController {
    /// Start at the root view, idle.
    pub fn new(config: &SceneConfig) -> Self {
        let root = CameraTarget::root(config);
        Self {
            position: root.position,
            look_at: root.look_at,
            target: Some(root),
            state: CameraState::Idle,
            damping: config.damping,
            epsilon: config.arrive_epsilon,
            fov_deg: config.fov_deg,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn target(&self) -> Option<CameraTarget> {
        self.target
    }

    /// Advance one frame toward `target` and return the resulting view.
    ///
    /// A target different (by value) from the previous one re-arms the
    /// flight from wherever the camera currently is; the last target wins.
    pub fn step(&mut self, dt: f32, target: CameraTarget) -> CameraView {
        if self.target != Some(target) {
            log::debug!(
                "camera: new target {:?} looking at {:?}",
                target.position,
                target.look_at
            );
            self.target = Some(target);
            self.state = CameraState::Animating;
        }
        self.look_at = target.look_at;

        if self.state == CameraState::Animating {
            let t = damp_factor(self.damping, dt);
            self.position += (target.position - self.position) * t;
            if !self.position.is_finite() {
                self.position = target.position;
            }
            if self.position.distance(target.position) < self.epsilon {
                self.state = CameraState::Idle;
                log::debug!("camera: arrived");
            }
        }

        self.view()
    }

    /// Current view without advancing.
    pub fn view(&self) -> CameraView {
        CameraView::look_at(self.position, self.look_at, self.fov_deg)
    }

    /// Orbit around the look-at point by `yaw` (about world Y) and `pitch`
    /// (about the camera's right axis), in radians. Pitch stops short of the
    /// poles. Does not re-arm the flight.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.look_at;
        let Some(dir) = safe_normalize(offset) else { return };
        let radius = offset.length();

        let mut dir = Quat::from_rotation_y(yaw) * dir;
        let max_pitch = std::f32::consts::FRAC_PI_2 - 0.05;
        let current = dir.y.clamp(-1.0, 1.0).asin();
        let pitch = (current + pitch).clamp(-max_pitch, max_pitch) - current;
        if let Some(right) = safe_normalize(Vec3::Y.cross(dir)) {
            dir = Quat::from_axis_angle(right, -pitch) * dir;
        }
        self.position = self.look_at + dir * radius;
    }

    /// Dolly toward (`factor` < 1) or away from (`factor` > 1) the look-at
    /// point, clamped to the configured zoom range.
    pub fn zoom(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let offset = self.position - self.look_at;
        let Some(dir) = safe_normalize(offset) else { return };
        let distance = (offset.length() * factor).clamp(self.min_distance, self.max_distance);
        self.position = self.look_at + dir * distance;
    }
}
