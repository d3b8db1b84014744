//! World generation validation

use drift_sim::simulation::{
    generate, water_is_clear, ExclusionMode, Position, RoadLayout, RoadSegment, SceneryKind,
    Water, WorldConfig, WorldGenerator, WorldMap,
};

fn seeded(seed: u64) -> WorldConfig {
    WorldConfig {
        seed: Some(seed),
        ..WorldConfig::default()
    }
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let a = generate(&seeded(42));
    let b = generate(&seeded(42));

    assert_eq!(a.roads, b.roads);
    assert_eq!(a.waters, b.waters);
    assert_eq!(a.scenery, b.scenery);

    let c = generate(&seeded(43));
    assert_ne!(a.scenery, c.scenery);
}

#[test]
fn test_grid_layout_covers_world() {
    let config = seeded(1);
    let map = generate(&config);

    // 10 lines per axis for a 20000 world with 2000 spacing, 10 blocks each
    assert_eq!(map.roads.len(), 200);
    assert_eq!(map.roads.iter().filter(|r| r.is_vertical()).count(), 100);
    assert_eq!(map.roads.iter().filter(|r| r.is_horizontal()).count(), 100);
    assert!(map.roads.iter().all(|r| r.width == config.road_width));
    for road in &map.roads {
        let length = (road.x2 - road.x1).abs() + (road.y2 - road.y1).abs();
        assert_eq!(length, config.grid_spacing);
    }

    // The player spawns on a road
    assert!(map.is_on_road(0.0, 0.0));
}

#[test]
fn test_highway_layout() {
    let config = WorldConfig {
        layout: RoadLayout::Highway,
        ..seeded(5)
    };
    let map = generate(&config);

    let pieces = (config.world_size / config.grid_spacing) as usize;
    assert_eq!(map.roads.len(), pieces + config.connector_count);
    for piece in &map.roads[..pieces] {
        assert!(piece.is_vertical());
        assert_eq!((piece.x1, piece.x2), (0.0, 0.0));
        assert_eq!((piece.y2 - piece.y1).abs(), config.grid_spacing);
        assert_eq!(piece.width, config.corridor_width);
    }
    assert!(map.is_on_road(0.0, -config.world_size / 2.0));
    assert!(map.is_on_road(0.0, config.world_size / 2.0));

    let half = config.corridor_width / 2.0;
    for connector in &map.roads[pieces..] {
        assert!(connector.is_horizontal());
        assert_eq!(connector.x1.abs(), half);
        assert!(connector.x2.abs() > half);
        assert!(connector.x2.abs() <= config.world_size / 2.0);
    }
}

#[test]
fn test_full_exclusion_keeps_features_off_roads() {
    for layout in [RoadLayout::Grid, RoadLayout::Highway] {
        let config = WorldConfig {
            layout,
            exclusion: ExclusionMode::Full,
            ..seeded(7)
        };
        let map = generate(&config);

        for water in &map.waters {
            assert!(water_is_clear(&map, water, config.water_padding - 1.0));
        }
        for scenery in &map.scenery {
            let p = scenery.position;
            match scenery.kind {
                SceneryKind::Tree => {
                    assert!(!map.is_near_road(p.x, p.y, config.tree_margin - 1.0))
                }
                SceneryKind::Building => {
                    assert!(!map.is_near_road(p.x, p.y, config.building_padding - 1.0))
                }
            }
        }
    }
}

#[test]
fn test_rejection_lowers_counts() {
    let config = seeded(11);
    let (map, report) = WorldGenerator::new(config.clone()).generate_with_report();

    assert!(map.tree_count() < config.tree_count);
    assert_eq!(map.tree_count() + report.trees_rejected, config.tree_count);
    assert_eq!(
        map.building_count() + report.buildings_rejected,
        config.building_count
    );
    assert_eq!(map.waters.len() + report.water_rejected, config.water_count);
}

#[test]
fn test_exclusion_off_accepts_everything() {
    let config = WorldConfig {
        exclusion: ExclusionMode::Off,
        ..seeded(3)
    };
    let map = generate(&config);

    assert_eq!(map.tree_count(), config.tree_count);
    assert_eq!(map.waters.len(), config.water_count);
    assert_eq!(map.building_count(), 0);
}

#[test]
fn test_scenery_only_places_all_water() {
    let config = WorldConfig {
        exclusion: ExclusionMode::SceneryOnly,
        ..seeded(3)
    };
    let map = generate(&config);

    assert_eq!(map.waters.len(), config.water_count);
    assert!(map.tree_count() < config.tree_count);
}

#[test]
fn test_water_bodies_follow_meander() {
    let map = generate(&seeded(9));
    for water in &map.waters {
        assert!(water.points.len() >= 50);
        assert!(water.width >= 150.0 && water.width < 450.0);
        for pair in water.points.windows(2) {
            assert!((pair[1].y - pair[0].y - 300.0).abs() < 1e-2);
        }
    }
}

#[test]
fn test_water_kept_whole_or_rejected() {
    // Only the corridor: bodies starting beside it are dropped, the rest kept
    let config = WorldConfig {
        layout: RoadLayout::Highway,
        connector_count: 0,
        water_count: 200,
        tree_count: 0,
        building_count: 0,
        ..seeded(21)
    };
    let (map, report) = WorldGenerator::new(config.clone()).generate_with_report();

    assert_eq!(map.waters.len() + report.water_rejected, config.water_count);
    assert!(!map.waters.is_empty());
    assert!(report.water_rejected > 0);
    for water in &map.waters {
        assert!((50..=130).contains(&water.points.len()), "{} points", water.points.len());
        assert!(water_is_clear(&map, water, config.water_padding));
    }
}

#[test]
fn test_water_rejected_whole_on_single_bad_point() {
    let mut map = WorldMap::new(20000.0);
    map.roads
        .push(RoadSegment::new(0.0, -10000.0, 0.0, 10000.0, 200.0));

    let clear = Water {
        points: vec![Position::ground(1000.0, 0.0), Position::ground(1000.0, 300.0)],
        width: 200.0,
    };
    assert!(water_is_clear(&map, &clear, 100.0));

    // Second point is 50 units from the road edge
    let crossing = Water {
        points: vec![Position::ground(1000.0, 0.0), Position::ground(150.0, 300.0)],
        width: 200.0,
    };
    assert!(!water_is_clear(&map, &crossing, 100.0));
}

#[test]
fn test_nearest_road_uses_manhattan_distance() {
    let mut map = WorldMap::new(20000.0);
    assert!(map.nearest_road(&Position::ground(0.0, 0.0)).is_none());

    map.roads.push(RoadSegment::new(-1000.0, 0.0, 1000.0, 0.0, 200.0));
    map.roads.push(RoadSegment::new(3000.0, -500.0, 3000.0, 500.0, 200.0));

    let near_first = map.nearest_road(&Position::ground(500.0, 300.0));
    assert_eq!(near_first, Some(&map.roads[0]));

    let near_second = map.nearest_road(&Position::ground(2500.0, 0.0));
    assert_eq!(near_second, Some(&map.roads[1]));
}

#[test]
fn test_road_along_prefers_heading_axis_at_crossings() {
    let mut map = WorldMap::new(20000.0);
    map.roads.push(RoadSegment::new(0.0, -4000.0, 0.0, -2000.0, 200.0));
    map.roads.push(RoadSegment::new(0.0, -2000.0, 0.0, 0.0, 200.0));
    map.roads.push(RoadSegment::new(0.0, -2000.0, 2000.0, -2000.0, 200.0));

    // At the crossing the horizontal block's center is closest
    let crossing = Position::ground(60.0, -2000.0);
    assert_eq!(map.nearest_road(&crossing), Some(&map.roads[2]));

    let heading_up = -std::f32::consts::FRAC_PI_2;
    let along = map.road_along(&crossing, heading_up).expect("road");
    assert!(along.is_vertical());
    assert_eq!(map.road_along(&crossing, 0.0), Some(&map.roads[2]));

    // Off every road it falls back to the nearest one
    let off = Position::ground(1000.0, -1000.0);
    assert_eq!(map.road_along(&off, heading_up), map.nearest_road(&off));
}
