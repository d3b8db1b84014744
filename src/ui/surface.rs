//! `DrawSurface` backed by Bevy gizmos
//!
//! Gizmos only draw lines, so fills come out as outlines and sprites as
//! their bounding boxes. Screen coordinates (origin top-left, Y down) are
//! mapped onto the 2D camera (origin centered, Y up).

use bevy::math::Affine2;
use bevy::prelude::*;

use crate::simulation::{
    CarModel, DrawSurface, Rgba, SceneryKind, Sprite, Stroke, Viewport,
};

/// Strokes wider than this are outlined as quads rather than drawn as a line
const THIN_STROKE: f32 = 2.0;

pub fn to_color(color: Rgba) -> Color {
    Color::srgba_u8(color.r, color.g, color.b, (color.a.clamp(0.0, 1.0) * 255.0) as u8)
}

fn sprite_color(sprite: Sprite) -> Color {
    match sprite {
        Sprite::Car(CarModel::Ferrari) => Color::srgb(0.85, 0.1, 0.1),
        Sprite::Car(CarModel::Lamborghini) => Color::srgb(0.95, 0.8, 0.1),
        Sprite::Car(CarModel::Porsche) => Color::srgb(0.9, 0.9, 0.9),
        Sprite::Scenery(SceneryKind::Tree) => Color::srgb(0.1, 0.4, 0.1),
        Sprite::Scenery(SceneryKind::Building) => Color::srgb(0.55, 0.45, 0.4),
    }
}

pub struct GizmoSurface<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    viewport: Viewport,
    current: Affine2,
    stack: Vec<Affine2>,
}

impl<'a, 'w, 's> GizmoSurface<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>, viewport: Viewport) -> Self {
        Self {
            gizmos,
            viewport,
            current: Affine2::IDENTITY,
            stack: Vec::new(),
        }
    }

    fn to_world(&self, point: [f32; 2]) -> Vec2 {
        let p = self.current.transform_point2(Vec2::new(point[0], point[1]));
        Vec2::new(
            p.x - self.viewport.width / 2.0,
            self.viewport.height / 2.0 - p.y,
        )
    }

    /// Uniform scale of the current transform, for radii and widths
    fn scale_factor(&self) -> f32 {
        self.current.matrix2.x_axis.length()
    }

    fn closed_outline(&mut self, points: &[[f32; 2]], color: Color) {
        if points.len() < 2 {
            return;
        }
        let mut outline: Vec<Vec2> = points.iter().map(|p| self.to_world(*p)).collect();
        outline.push(outline[0]);
        self.gizmos.linestrip_2d(outline, color);
    }

    fn segment(&mut self, a: Vec2, b: Vec2, half_width: f32, color: Color) {
        if half_width <= THIN_STROKE / 2.0 {
            self.gizmos.line_2d(a, b, color);
            return;
        }
        let normal = (b - a).perp().normalize_or_zero() * half_width;
        self.gizmos
            .linestrip_2d([a + normal, b + normal, b - normal, a - normal, a + normal], color);
    }
}

impl DrawSurface for GizmoSurface<'_, '_, '_> {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(saved) = self.stack.pop() {
            self.current = saved;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.current = self.current * Affine2::from_translation(Vec2::new(x, y));
    }

    fn rotate(&mut self, angle: f32) {
        self.current = self.current * Affine2::from_angle(angle);
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.current = self.current * Affine2::from_scale(Vec2::new(x, y));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.closed_outline(&[[x, y], [x + w, y], [x + w, y + h], [x, y + h]], to_color(color));
    }

    fn fill_path(&mut self, points: &[[f32; 2]], color: Rgba) {
        self.closed_outline(points, to_color(color));
    }

    fn stroke_path(&mut self, points: &[[f32; 2]], stroke: &Stroke) {
        let color = to_color(stroke.color);
        let half_width = stroke.width * self.scale_factor() / 2.0;
        let world: Vec<Vec2> = points.iter().map(|p| self.to_world(*p)).collect();

        for pair in world.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match stroke.dash {
                None => self.segment(a, b, half_width, color),
                Some([dash, gap]) => {
                    let length = a.distance(b);
                    let period = (dash + gap) * self.scale_factor();
                    if period <= 0.0 || length <= 0.0 {
                        continue;
                    }
                    let dir = (b - a) / length;
                    let on = dash * self.scale_factor();
                    let mut start = 0.0;
                    while start < length {
                        let end = (start + on).min(length);
                        self.segment(a + dir * start, a + dir * end, half_width, color);
                        start += period;
                    }
                }
            }
        }
    }

    fn fill_ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32, color: Rgba) {
        let center = self.to_world([x, y]);
        let scale = self.scale_factor();
        self.gizmos.ellipse_2d(
            Isometry2d::from_translation(center),
            Vec2::new(rx * scale, ry * scale),
            to_color(color),
        );
    }

    fn blit(&mut self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32) {
        self.closed_outline(
            &[[x, y], [x + w, y], [x + w, y + h], [x, y + h]],
            sprite_color(sprite),
        );
    }
}
