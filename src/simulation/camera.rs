//! Camera state and world-to-screen projection
//!
//! Projection is pure: the same point, camera and viewport always give the
//! same screen point, so it can be tested without any drawing.

use super::config::{CameraConfig, ViewMode};
use super::types::{Position, ScreenPoint, Viewport};

use std::f32::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Top-down: the world point shown at the surface's top-left corner.
    /// Perspective: the eye position on the ground plane.
    pub x: f32,
    pub y: f32,
    /// Eye height above the ground
    pub height: f32,
    /// Yaw; the direction the camera looks along
    pub angle: f32,
}

impl Camera {
    pub fn new(x: f32, y: f32, height: f32, angle: f32) -> Self {
        Self {
            x,
            y,
            height,
            angle,
        }
    }

    /// Viewport centered on `target`
    pub fn centered_on(target: &Position, viewport: Viewport) -> Self {
        Self {
            x: target.x - viewport.width / 2.0,
            y: target.y - viewport.height / 2.0,
            height: 0.0,
            angle: 0.0,
        }
    }

    /// Place a chase camera directly at its trailing position behind `target`
    pub fn behind(target: &Position, config: &CameraConfig) -> Self {
        let (x, y) = chase_point(target, config);
        Self {
            x,
            y,
            height: config.height,
            angle: config.angle,
        }
    }

    /// Ease toward the trailing position behind `target`. Yaw and height stay
    /// pinned to the configured values.
    pub fn follow(&mut self, target: &Position, config: &CameraConfig) {
        let (tx, ty) = chase_point(target, config);
        self.x += (tx - self.x) * config.follow;
        self.y += (ty - self.y) * config.follow;
        self.height = config.height;
        self.angle = config.angle;
    }

    /// Update for one frame in the given view mode
    pub fn update(&mut self, target: &Position, viewport: Viewport, config: &CameraConfig) {
        match config.mode {
            ViewMode::TopDown => *self = Camera::centered_on(target, viewport),
            ViewMode::Perspective => self.follow(target, config),
        }
    }
}

fn chase_point(target: &Position, config: &CameraConfig) -> (f32, f32) {
    (
        target.x - config.angle.cos() * config.distance,
        target.y - config.angle.sin() * config.distance,
    )
}

/// Flat projection: translate by the camera, unit scale. Never clips.
pub fn project_top_down(point: &Position, camera: &Camera) -> ScreenPoint {
    ScreenPoint {
        x: point.x - camera.x,
        y: point.y - camera.y,
        scale: 1.0,
    }
}

/// Distance of `point` along the camera's forward axis
pub fn depth(point: &Position, camera: &Camera) -> f32 {
    let (_, ry) = rotate_into_view(point, camera);
    -ry
}

fn rotate_into_view(point: &Position, camera: &Camera) -> (f32, f32) {
    let dx = point.x - camera.x;
    let dy = point.y - camera.y;
    let theta = -camera.angle - FRAC_PI_2;
    let (sin, cos) = theta.sin_cos();
    (dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Pinhole projection with scale `fov / depth`.
///
/// Returns `None` for points at or behind the near clip plane.
pub fn project_perspective(
    point: &Position,
    camera: &Camera,
    viewport: Viewport,
    fov: f32,
    near_clip: f32,
) -> Option<ScreenPoint> {
    let (rx, ry) = rotate_into_view(point, camera);
    let depth = -ry;
    if depth <= near_clip {
        return None;
    }

    let scale = fov / depth;
    Some(ScreenPoint {
        x: rx * scale + viewport.width / 2.0,
        y: viewport.height / 2.0 - (point.z - camera.height) * scale,
        scale,
    })
}

/// Project with whichever view mode `config` selects
pub fn project(
    point: &Position,
    camera: &Camera,
    viewport: Viewport,
    config: &CameraConfig,
) -> Option<ScreenPoint> {
    match config.mode {
        ViewMode::TopDown => Some(project_top_down(point, camera)),
        ViewMode::Perspective => {
            project_perspective(point, camera, viewport, config.fov, config.near_clip)
        }
    }
}
