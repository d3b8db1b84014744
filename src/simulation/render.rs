//! Depth-ordered render pipeline
//!
//! Turns the world, the vehicles and the camera into a `DrawList`. Rendering
//! only reads simulation state.

use ordered_float::OrderedFloat;
use sorted_vec::SortedVec;

use super::camera::{project_perspective, Camera};
use super::config::{CameraConfig, ViewMode, ROAD_SEGMENT_LENGTH, WATER_BANK};
use super::draw::{
    DrawCommand, DrawList, Rgba, Sprite, Stroke, ASPHALT, ASPHALT_LIGHT, BANK, GRASS,
    HEADLIGHT, MARKING, SKY, SMOKE, WATER,
};
use super::map::{RoadSegment, Scenery, SceneryKind, WorldMap};
use super::types::{Position, Rect, ScreenPoint, Viewport};
use super::vehicle::{Particle, Vehicle};

/// Cached tree sprite size and the trunk base inside it
const TREE_SPRITE: (f32, f32) = (200.0, 300.0);
const TREE_ANCHOR: (f32, f32) = (100.0, 250.0);
const BUILDING_SPRITE: (f32, f32) = (120.0, 160.0);
/// Height of a car seen from behind in the chase view
const CAR_REAR_HEIGHT: f32 = 60.0;
const MARKING_WIDTH: f32 = 4.0;
const DASH: f32 = 30.0;
const HEADLIGHT_CONE: [[f32; 2]; 4] = [[-20.0, -50.0], [-60.0, -250.0], [60.0, -250.0], [20.0, -50.0]];

/// Something drawn in painter's order
#[derive(Debug, Clone, Copy)]
enum RenderItem<'a> {
    Scenery(&'a Scenery),
    Vehicle(&'a Vehicle),
}

impl RenderItem<'_> {
    fn position(&self) -> &Position {
        match self {
            RenderItem::Scenery(s) => &s.position,
            RenderItem::Vehicle(v) => &v.position,
        }
    }
}

/// Order items by world Y, smallest (furthest back) first. Ties keep no
/// particular order.
fn painter_order(items: &[RenderItem<'_>]) -> SortedVec<(OrderedFloat<f32>, usize)> {
    SortedVec::from_unsorted(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| (OrderedFloat(item.position().y), i))
            .collect(),
    )
}

/// Quad of one road strip between two world-Y values
#[derive(Debug, Clone, Copy)]
struct RoadStrip<'a> {
    road: &'a RoadSegment,
    far: f32,
    near: f32,
    /// Index of the strip on the world-aligned segment grid
    index: i64,
}

pub struct Renderer {
    pub config: CameraConfig,
}

impl Renderer {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    pub fn render(
        &self,
        map: &WorldMap,
        vehicles: &[Vehicle],
        particles: &[Particle],
        camera: &Camera,
        viewport: Viewport,
    ) -> DrawList {
        match self.config.mode {
            ViewMode::TopDown => self.render_top_down(map, vehicles, particles, camera, viewport),
            ViewMode::Perspective => {
                self.render_perspective(map, vehicles, particles, camera, viewport)
            }
        }
    }

    fn render_top_down(
        &self,
        map: &WorldMap,
        vehicles: &[Vehicle],
        particles: &[Particle],
        camera: &Camera,
        viewport: Viewport,
    ) -> DrawList {
        let mut list = DrawList::new();
        list.push(DrawCommand::FillRect {
            x: 0.0,
            y: 0.0,
            w: viewport.width,
            h: viewport.height,
            color: GRASS,
        });

        list.push(DrawCommand::Save);
        list.push(DrawCommand::Translate {
            x: -camera.x,
            y: -camera.y,
        });

        let pad = self.config.cull_padding;
        let view = Rect::new(
            camera.x - pad,
            camera.y - pad,
            camera.x + viewport.width + pad,
            camera.y + viewport.height + pad,
        );

        for road in map.roads.iter().filter(|r| r.bounds().intersects(&view)) {
            let line = vec![[road.x1, road.y1], [road.x2, road.y2]];
            list.push(DrawCommand::StrokePath {
                points: line.clone(),
                stroke: Stroke::solid(ASPHALT, road.width),
            });
            list.push(DrawCommand::StrokePath {
                points: line,
                stroke: Stroke::dashed(MARKING, MARKING_WIDTH, DASH, DASH),
            });
        }

        for water in &map.waters {
            if !water.bounds().is_some_and(|b| b.intersects(&view)) {
                continue;
            }
            let points: Vec<[f32; 2]> = water.points.iter().map(|p| [p.x, p.y]).collect();
            list.push(DrawCommand::StrokePath {
                points: points.clone(),
                stroke: Stroke::rounded(BANK, water.width + WATER_BANK),
            });
            list.push(DrawCommand::StrokePath {
                points,
                stroke: Stroke::rounded(WATER, water.width),
            });
        }

        for particle in particles {
            list.push(DrawCommand::FillEllipse {
                x: particle.position.x,
                y: particle.position.y,
                rx: particle.size,
                ry: particle.size,
                color: SMOKE.with_alpha(SMOKE.a * particle.life.clamp(0.0, 1.0)),
            });
        }

        let inside = |p: &Position| {
            p.x > view.min_x && p.x < view.max_x && p.y > view.min_y && p.y < view.max_y
        };
        let items: Vec<RenderItem> = map
            .scenery
            .iter()
            .filter(|s| inside(&s.position))
            .map(RenderItem::Scenery)
            .chain(
                vehicles
                    .iter()
                    .filter(|v| inside(&v.position))
                    .map(RenderItem::Vehicle),
            )
            .collect();

        let order = painter_order(&items);
        for (_, index) in order.iter() {
            match items[*index] {
                RenderItem::Scenery(scenery) => draw_scenery_top_down(&mut list, scenery),
                RenderItem::Vehicle(vehicle) => draw_vehicle_top_down(&mut list, vehicle),
            }
        }

        list.push(DrawCommand::Restore);
        list
    }

    fn render_perspective(
        &self,
        map: &WorldMap,
        vehicles: &[Vehicle],
        particles: &[Particle],
        camera: &Camera,
        viewport: Viewport,
    ) -> DrawList {
        let mut list = DrawList::new();
        let horizon = viewport.height / 2.0;
        list.push(DrawCommand::FillRect {
            x: 0.0,
            y: 0.0,
            w: viewport.width,
            h: horizon,
            color: SKY,
        });
        list.push(DrawCommand::FillRect {
            x: 0.0,
            y: horizon,
            w: viewport.width,
            h: viewport.height - horizon,
            color: GRASS,
        });

        let y_min = camera.y - self.config.view_ahead;
        let y_max = camera.y + self.config.view_behind;
        let project = |p: &Position| {
            project_perspective(p, camera, viewport, self.config.fov, self.config.near_clip)
        };

        self.draw_road_strips(&mut list, map, y_min, y_max, &project);
        self.draw_water_perspective(&mut list, map, y_min, y_max, &project);

        for particle in particles {
            if particle.position.y < y_min || particle.position.y > y_max {
                continue;
            }
            if let Some(sp) = project(&particle.position) {
                let r = particle.size * sp.scale;
                list.push(DrawCommand::FillEllipse {
                    x: sp.x,
                    y: sp.y,
                    rx: r,
                    ry: r,
                    color: SMOKE.with_alpha(SMOKE.a * particle.life.clamp(0.0, 1.0)),
                });
            }
        }

        let in_window = |p: &Position| p.y >= y_min && p.y <= y_max;
        let items: Vec<RenderItem> = map
            .scenery
            .iter()
            .filter(|s| in_window(&s.position))
            .map(RenderItem::Scenery)
            .chain(
                vehicles
                    .iter()
                    .filter(|v| in_window(&v.position))
                    .map(RenderItem::Vehicle),
            )
            .collect();

        let order = painter_order(&items);
        for (_, index) in order.iter() {
            let item = items[*index];
            let Some(base) = project(item.position()) else {
                continue;
            };
            match item {
                RenderItem::Scenery(scenery) => draw_scenery_billboard(&mut list, scenery, base),
                RenderItem::Vehicle(vehicle) => {
                    let w = vehicle.width * base.scale;
                    let h = CAR_REAR_HEIGHT * base.scale;
                    list.push(DrawCommand::Blit {
                        sprite: Sprite::Car(vehicle.model),
                        x: base.x - w / 2.0,
                        y: base.y - h,
                        w,
                        h,
                    });
                }
            }
        }

        list
    }

    /// Road surface as trapezoids from far to near, tinted alternately per
    /// world-aligned strip, with a dashed centerline on vertical roads
    fn draw_road_strips(
        &self,
        list: &mut DrawList,
        map: &WorldMap,
        y_min: f32,
        y_max: f32,
        project: &impl Fn(&Position) -> Option<ScreenPoint>,
    ) {
        let mut strips = Vec::new();
        for road in &map.roads {
            let bounds = road.bounds();
            let lo = bounds.min_y.max(y_min);
            let hi = bounds.max_y.min(y_max);
            if hi <= lo {
                continue;
            }
            let first = (lo / ROAD_SEGMENT_LENGTH).floor() as i64;
            let last = (hi / ROAD_SEGMENT_LENGTH).ceil() as i64;
            for index in first..last {
                let far = (index as f32 * ROAD_SEGMENT_LENGTH).max(lo);
                let near = ((index + 1) as f32 * ROAD_SEGMENT_LENGTH).min(hi);
                if near > far {
                    strips.push(RoadStrip {
                        road,
                        far,
                        near,
                        index,
                    });
                }
            }
        }
        strips.sort_by_key(|strip| OrderedFloat(strip.far));

        for strip in &strips {
            let bounds = strip.road.bounds();
            let Some(quad) = project_quad(project, bounds.min_x, bounds.max_x, strip.far, strip.near)
            else {
                continue;
            };
            list.push(DrawCommand::FillPath {
                points: quad,
                color: strip_tint(strip.index),
            });

            if strip.road.is_vertical() && strip.index.rem_euclid(4) < 2 {
                let cx = strip.road.center().x;
                let half = MARKING_WIDTH / 2.0;
                if let Some(dash) = project_quad(project, cx - half, cx + half, strip.far, strip.near) {
                    list.push(DrawCommand::FillPath {
                        points: dash,
                        color: MARKING,
                    });
                }
            }
        }
    }

    fn draw_water_perspective(
        &self,
        list: &mut DrawList,
        map: &WorldMap,
        y_min: f32,
        y_max: f32,
        project: &impl Fn(&Position) -> Option<ScreenPoint>,
    ) {
        let mut banks = Vec::new();
        let mut ribbons = Vec::new();
        for water in &map.waters {
            let projected: Vec<Option<ScreenPoint>> = water
                .points
                .iter()
                .map(|p| {
                    if p.y >= y_min && p.y <= y_max {
                        project(p)
                    } else {
                        None
                    }
                })
                .collect();
            for pair in projected.windows(2) {
                if let [Some(a), Some(b)] = pair {
                    let scale = (a.scale + b.scale) / 2.0;
                    let points = vec![[a.x, a.y], [b.x, b.y]];
                    banks.push(DrawCommand::StrokePath {
                        points: points.clone(),
                        stroke: Stroke::rounded(BANK, (water.width + WATER_BANK) * scale),
                    });
                    ribbons.push(DrawCommand::StrokePath {
                        points,
                        stroke: Stroke::rounded(WATER, water.width * scale),
                    });
                }
            }
        }
        list.commands.extend(banks);
        list.commands.extend(ribbons);
    }
}

/// Screen corners of the ground quad spanning `[x0, x1] x [far, near]`,
/// or `None` if any corner is clipped
fn project_quad(
    project: &impl Fn(&Position) -> Option<ScreenPoint>,
    x0: f32,
    x1: f32,
    far: f32,
    near: f32,
) -> Option<Vec<[f32; 2]>> {
    [(x0, far), (x1, far), (x1, near), (x0, near)]
        .iter()
        .map(|&(x, y)| project(&Position::ground(x, y)).map(|sp| [sp.x, sp.y]))
        .collect()
}

fn draw_scenery_top_down(list: &mut DrawList, scenery: &Scenery) {
    let (w, h, ax, ay) = match scenery.kind {
        SceneryKind::Tree => (TREE_SPRITE.0, TREE_SPRITE.1, TREE_ANCHOR.0, TREE_ANCHOR.1),
        SceneryKind::Building => (
            BUILDING_SPRITE.0,
            BUILDING_SPRITE.0,
            BUILDING_SPRITE.0 / 2.0,
            BUILDING_SPRITE.0 / 2.0,
        ),
    };
    list.push(DrawCommand::Save);
    list.push(DrawCommand::Translate {
        x: scenery.position.x,
        y: scenery.position.y,
    });
    list.push(DrawCommand::Scale {
        x: scenery.scale,
        y: scenery.scale,
    });
    list.push(DrawCommand::Blit {
        sprite: Sprite::Scenery(scenery.kind),
        x: -ax,
        y: -ay,
        w,
        h,
    });
    list.push(DrawCommand::Restore);
}

fn draw_vehicle_top_down(list: &mut DrawList, vehicle: &Vehicle) {
    list.push(DrawCommand::Save);
    list.push(DrawCommand::Translate {
        x: vehicle.position.x,
        y: vehicle.position.y,
    });
    list.push(DrawCommand::Rotate {
        angle: vehicle.sprite_rotation(),
    });
    list.push(DrawCommand::Blit {
        sprite: Sprite::Car(vehicle.model),
        x: -vehicle.width / 2.0,
        y: -vehicle.length / 2.0,
        w: vehicle.width,
        h: vehicle.length,
    });
    if vehicle.is_player() {
        list.push(DrawCommand::FillPath {
            points: HEADLIGHT_CONE.to_vec(),
            color: HEADLIGHT,
        });
    }
    list.push(DrawCommand::Restore);
}

/// Upright sprite standing on its projected base point
fn draw_scenery_billboard(list: &mut DrawList, scenery: &Scenery, base: ScreenPoint) {
    let size = scenery.scale * base.scale;
    let (w, h, anchor_x, anchor_y) = match scenery.kind {
        SceneryKind::Tree => (
            TREE_SPRITE.0 * size,
            TREE_SPRITE.1 * size,
            TREE_ANCHOR.0 * size,
            TREE_ANCHOR.1 * size,
        ),
        SceneryKind::Building => (
            BUILDING_SPRITE.0 * size,
            BUILDING_SPRITE.1 * size,
            BUILDING_SPRITE.0 * size / 2.0,
            BUILDING_SPRITE.1 * size,
        ),
    };
    list.push(DrawCommand::Blit {
        sprite: Sprite::Scenery(scenery.kind),
        x: base.x - anchor_x,
        y: base.y - anchor_y,
        w,
        h,
    });
}

/// Tint used for a road strip on the segment grid
pub fn strip_tint(index: i64) -> Rgba {
    if index.rem_euclid(2) == 0 {
        ASPHALT
    } else {
        ASPHALT_LIGHT
    }
}
