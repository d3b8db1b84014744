//! Static world geometry: roads, water and scenery
//!
//! A `WorldMap` is built once by the generator and then only read by the
//! simulator, the AI and the renderer.

use ordered_float::OrderedFloat;

use super::types::{Position, Rect};

/// A straight, axis-aligned road described as a centerline with a width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
}

impl RoadSegment {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, width: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            width,
        }
    }

    /// Drivable rectangle covered by the road
    pub fn bounds(&self) -> Rect {
        let half = self.width * 0.5;
        Rect::new(
            self.x1.min(self.x2) - half,
            self.y1.min(self.y2) - half,
            self.x1.max(self.x2) + half,
            self.y1.max(self.y2) + half,
        )
    }

    pub fn center(&self) -> Position {
        Position::ground((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }

    /// Runs along the Y axis
    pub fn is_vertical(&self) -> bool {
        (self.y2 - self.y1).abs() > (self.x2 - self.x1).abs()
    }

    pub fn is_horizontal(&self) -> bool {
        (self.x2 - self.x1).abs() > (self.y2 - self.y1).abs()
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds().contains(x, y)
    }
}

/// Kind of static scenery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneryKind {
    Tree,
    /// Solid obstacle the cars bounce off
    Building,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenery {
    pub position: Position,
    pub scale: f32,
    pub rotation: f32,
    pub kind: SceneryKind,
}

/// A river or backwater drawn as a ribbon along a polyline
#[derive(Debug, Clone, PartialEq)]
pub struct Water {
    pub points: Vec<Position>,
    pub width: f32,
}

impl Water {
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let mut rect = Rect::new(first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            rect.min_x = rect.min_x.min(p.x);
            rect.min_y = rect.min_y.min(p.y);
            rect.max_x = rect.max_x.max(p.x);
            rect.max_y = rect.max_y.max(p.y);
        }
        Some(rect.padded(self.width * 0.5))
    }
}

/// The generated world
#[derive(Debug, Clone, Default)]
pub struct WorldMap {
    /// Half the side length of the square world; the world spans `[-h, h]`
    pub half_size: f32,
    pub roads: Vec<RoadSegment>,
    pub waters: Vec<Water>,
    pub scenery: Vec<Scenery>,
}

impl WorldMap {
    pub fn new(world_size: f32) -> Self {
        Self {
            half_size: world_size * 0.5,
            ..Default::default()
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(-self.half_size, -self.half_size, self.half_size, self.half_size)
    }

    pub fn is_on_road(&self, x: f32, y: f32) -> bool {
        self.roads.iter().any(|road| road.contains(x, y))
    }

    /// True if `(x, y)` lies inside any road rectangle grown by `padding`
    pub fn is_near_road(&self, x: f32, y: f32, padding: f32) -> bool {
        self.roads
            .iter()
            .any(|road| road.bounds().padded(padding).contains(x, y))
    }

    /// Road whose center is closest to `position` by Manhattan distance
    pub fn nearest_road(&self, position: &Position) -> Option<&RoadSegment> {
        self.roads
            .iter()
            .min_by_key(|road| OrderedFloat(road.center().manhattan(position)))
    }

    /// Road a car at `position` heading along `angle` is driving on.
    ///
    /// At an intersection both the crossing and the road ahead contain the
    /// car, so roads running along the heading's axis win there. Off any such
    /// road this is `nearest_road`.
    pub fn road_along(&self, position: &Position, angle: f32) -> Option<&RoadSegment> {
        let vertical = angle.sin().abs() > angle.cos().abs();
        self.roads
            .iter()
            .filter(|road| road.is_vertical() == vertical && road.contains(position.x, position.y))
            .min_by_key(|road| OrderedFloat(road.center().manhattan(position)))
            .or_else(|| self.nearest_road(position))
    }

    /// Buildings the vehicles collide with
    pub fn obstacles(&self) -> impl Iterator<Item = &Scenery> {
        self.scenery
            .iter()
            .filter(|s| s.kind == SceneryKind::Building)
    }

    pub fn tree_count(&self) -> usize {
        self.scenery
            .iter()
            .filter(|s| s.kind == SceneryKind::Tree)
            .count()
    }

    pub fn building_count(&self) -> usize {
        self.obstacles().count()
    }
}
