//! Procedural world generation
//!
//! Lays down the road network, then water bodies and scenery that keep clear
//! of it. Overlap checks are axis-aligned tests against road rectangles.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::f32::consts::TAU;

use super::config::{
    ExclusionMode, RoadLayout, WorldConfig, BUILDING_MIN_SCALE, BUILDING_SCALE_RANGE,
    CONNECTOR_MAX_LENGTH, CONNECTOR_MIN_LENGTH, TREE_MIN_SCALE, TREE_SCALE_RANGE,
    WATER_AMPLITUDE, WATER_FREQUENCY, WATER_JITTER, WATER_MIN_POINTS, WATER_MIN_WIDTH,
    WATER_POINT_RANGE, WATER_STEP, WATER_WIDTH_RANGE,
};
use super::map::{RoadSegment, Scenery, SceneryKind, Water, WorldMap};
use super::types::Position;

/// Counts of candidates thrown away during generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub water_rejected: usize,
    pub trees_rejected: usize,
    pub buildings_rejected: usize,
}

/// Builds a `WorldMap` from a `WorldConfig`
pub struct WorldGenerator {
    config: WorldConfig,
    /// Seeded RNG for reproducible worlds; `None` uses the thread RNG
    rng: Option<StdRng>,
    report: GenerationReport,
}

impl WorldGenerator {
    pub fn new(config: WorldConfig) -> Self {
        let rng = config.seed.map(StdRng::seed_from_u64);
        Self {
            config,
            rng,
            report: GenerationReport::default(),
        }
    }

    /// Uniform value in `[0, 1)`, using the seeded RNG if available
    fn unit(&mut self) -> f32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(0.0..1.0),
            None => rand::rng().random_range(0.0..1.0),
        }
    }

    /// Uniform coordinate anywhere inside the world
    fn world_coordinate(&mut self) -> f32 {
        self.unit() * self.config.world_size - self.config.world_size * 0.5
    }

    /// Generate the world and report what was rejected along the way
    pub fn generate_with_report(mut self) -> (WorldMap, GenerationReport) {
        let mut map = WorldMap::new(self.config.world_size);

        map.roads = match self.config.layout {
            RoadLayout::Grid => self.grid_roads(),
            RoadLayout::Highway => self.highway_roads(),
        };
        self.place_water(&mut map);
        self.place_trees(&mut map);
        self.place_buildings(&mut map);

        info!(
            "Generated world: {} roads, {} water bodies ({} rejected), {} trees ({} rejected), {} buildings ({} rejected)",
            map.roads.len(),
            map.waters.len(),
            self.report.water_rejected,
            map.tree_count(),
            self.report.trees_rejected,
            map.building_count(),
            self.report.buildings_rejected,
        );

        (map, self.report)
    }

    pub fn generate(self) -> WorldMap {
        self.generate_with_report().0
    }

    /// Full orthogonal grid; lines start at the world's low edge. Each line
    /// is split into one segment per block so segment centers stay local.
    fn grid_roads(&self) -> Vec<RoadSegment> {
        let half = self.config.world_size * 0.5;
        let spacing = self.config.grid_spacing;
        let width = self.config.road_width;

        let offsets: Vec<f32> = block_spans(-half, half, spacing)
            .map(|(start, _)| start)
            .collect();

        let horizontal = offsets.iter().flat_map(|&y| {
            block_spans(-half, half, spacing)
                .map(move |(x1, x2)| RoadSegment::new(x1, y, x2, y, width))
        });
        let vertical = offsets.iter().flat_map(|&x| {
            block_spans(-half, half, spacing)
                .map(move |(y1, y2)| RoadSegment::new(x, y1, x, y2, width))
        });
        horizontal.chain(vertical).collect()
    }

    /// One long vertical corridor, cut into `grid_spacing` pieces, plus
    /// connectors branching off either side
    fn highway_roads(&mut self) -> Vec<RoadSegment> {
        let half = self.config.world_size * 0.5;
        let corridor_half = self.config.corridor_width * 0.5;
        let mut roads: Vec<RoadSegment> = block_spans(-half, half, self.config.grid_spacing)
            .map(|(y1, y2)| RoadSegment::new(0.0, y1, 0.0, y2, self.config.corridor_width))
            .collect();

        for _ in 0..self.config.connector_count {
            let y = self.world_coordinate();
            let side = if self.unit() < 0.5 { -1.0 } else { 1.0 };
            let length = CONNECTOR_MIN_LENGTH
                + self.unit() * (CONNECTOR_MAX_LENGTH - CONNECTOR_MIN_LENGTH);
            let end = (corridor_half + length).min(half);
            roads.push(RoadSegment::new(
                side * corridor_half,
                y,
                side * end,
                y,
                self.config.road_width,
            ));
        }
        roads
    }

    fn place_water(&mut self, map: &mut WorldMap) {
        let strict = self.config.exclusion == ExclusionMode::Full;
        let padding = self.config.water_padding;

        for candidate in 0..self.config.water_count {
            let start_x = self.world_coordinate();
            let start_y = self.world_coordinate();
            let width = WATER_MIN_WIDTH + self.unit() * WATER_WIDTH_RANGE;
            let len = (WATER_MIN_POINTS + self.unit() * WATER_POINT_RANGE).ceil() as usize;

            if strict && map.is_near_road(start_x, start_y, padding) {
                debug!("Water body {} rejected: source is on a road", candidate);
                self.report.water_rejected += 1;
                continue;
            }

            let points = (0..len)
                .map(|j| {
                    let j = j as f32;
                    let x = start_x
                        + (j * WATER_FREQUENCY).sin() * WATER_AMPLITUDE
                        + (self.unit() - 0.5) * WATER_JITTER;
                    Position::ground(x, start_y + j * WATER_STEP)
                })
                .collect();
            let water = Water { points, width };

            if strict && !water_is_clear(map, &water, padding) {
                debug!("Water body {} rejected: its course crosses a road", candidate);
                self.report.water_rejected += 1;
                continue;
            }

            map.waters.push(water);
        }
    }

    fn place_trees(&mut self, map: &mut WorldMap) {
        for _ in 0..self.config.tree_count {
            let x = self.world_coordinate();
            let y = self.world_coordinate();

            if !self.clear_for_tree(map, x, y) {
                self.report.trees_rejected += 1;
                continue;
            }

            let scale = TREE_MIN_SCALE + self.unit() * TREE_SCALE_RANGE;
            let rotation = self.unit() * TAU;
            map.scenery.push(Scenery {
                position: Position::ground(x, y),
                scale,
                rotation,
                kind: SceneryKind::Tree,
            });
        }
    }

    /// Grid worlds use the distance to the nearest grid line instead of
    /// scanning every road.
    fn clear_for_tree(&self, map: &WorldMap, x: f32, y: f32) -> bool {
        if self.config.exclusion == ExclusionMode::Off {
            return true;
        }
        match self.config.layout {
            RoadLayout::Grid => {
                let half = self.config.world_size * 0.5;
                let spacing = self.config.grid_spacing;
                let margin = self.config.road_width * 0.5 + self.config.tree_margin;
                let to_line = |v: f32| {
                    let offset = v + half;
                    (offset - (offset / spacing).round() * spacing).abs()
                };
                to_line(x) >= margin && to_line(y) >= margin
            }
            RoadLayout::Highway => !map.is_near_road(x, y, self.config.tree_margin),
        }
    }

    fn place_buildings(&mut self, map: &mut WorldMap) {
        if self.config.exclusion == ExclusionMode::Off {
            return;
        }
        for _ in 0..self.config.building_count {
            let x = self.world_coordinate();
            let y = self.world_coordinate();

            if map.is_near_road(x, y, self.config.building_padding) {
                self.report.buildings_rejected += 1;
                continue;
            }

            let scale = BUILDING_MIN_SCALE + self.unit() * BUILDING_SCALE_RANGE;
            map.scenery.push(Scenery {
                position: Position::ground(x, y),
                scale,
                rotation: 0.0,
                kind: SceneryKind::Building,
            });
        }
    }
}

/// `[start, end)` cut into consecutive spans of `step`; the last span is
/// clipped to `end`
fn block_spans(start: f32, end: f32, step: f32) -> impl Iterator<Item = (f32, f32)> {
    let count = ((end - start) / step).ceil() as usize;
    (0..count)
        .map(move |i| start + i as f32 * step)
        .filter(move |from| *from < end)
        .map(move |from| (from, (from + step).min(end)))
}

/// Generate a world from `config`
pub fn generate(config: &WorldConfig) -> WorldMap {
    WorldGenerator::new(config.clone()).generate()
}

/// True if no point of `water` lies within `padding` of any road on `map`.
///
/// Stops at the first offending point; a body is accepted whole or not at all.
pub fn water_is_clear(map: &WorldMap, water: &Water, padding: f32) -> bool {
    !water
        .points
        .iter()
        .any(|p| map.is_near_road(p.x, p.y, padding))
}
