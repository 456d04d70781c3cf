//! Height-field generation and floor lookup properties.

use rstest::rstest;
use spritefield::config::{EdgePolicy, TerrainConfig};
use spritefield::sim_rng::SimRng;
use spritefield::terrain::{generate_heights, HeightField, LayerRange};

const LAYERS: LayerRange = LayerRange { max: 10, min: 2 };

#[rstest]
#[case(1)]
#[case(42)]
#[case(9000)]
fn same_seed_same_terrain(#[case] seed: u64) {
    let first = generate_heights(24, 24, 0.5, 4, LAYERS, &mut SimRng::from_seed_u64(seed));
    let second = generate_heights(24, 24, 0.5, 4, LAYERS, &mut SimRng::from_seed_u64(seed));
    assert_eq!(first, second);
    assert_eq!(first.len(), 24);
    assert!(first.iter().all(|column| column.len() == 24));
}

#[test]
fn different_seeds_differ() {
    let a = generate_heights(24, 24, 0.5, 4, LAYERS, &mut SimRng::from_seed_u64(1));
    let b = generate_heights(24, 24, 0.5, 4, LAYERS, &mut SimRng::from_seed_u64(2));
    assert_ne!(a, b);
}

#[rstest]
#[case(0.0)]
#[case(0.44)]
#[case(0.8)]
#[case(1.0)]
fn heights_stay_within_the_layer_count(#[case] fill: f32) {
    let config = TerrainConfig {
        cols: 24,
        rows: 24,
        fill,
        ..TerrainConfig::default()
    };
    let field = HeightField::generate(&config, &mut SimRng::from_seed_u64(3));
    let mut seen = 0;
    for col in 0..field.cols() {
        for row in 0..field.rows() {
            let height = field.height_at(col, row).expect("inside grid");
            assert!(height <= config.max_level_height);
            seen += 1;
        }
    }
    assert_eq!(seen, 24 * 24);
}

#[rstest]
#[case::open(EdgePolicy::Open, 0)]
#[case::walled(EdgePolicy::Walled { height: 20 }, 20)]
fn floor_lookup_is_total(#[case] edge: EdgePolicy, #[case] outside: u32) {
    let config = TerrainConfig {
        cols: 24,
        rows: 24,
        edge,
        ..TerrainConfig::default()
    };
    let field = HeightField::generate(&config, &mut SimRng::from_seed_u64(11));
    let span = -12.0..12.0;
    for step in -60_i16..=60 {
        let t = f32::from(step) * 0.5;
        for (x, y) in [(t, 0.0), (0.0, t), (t, -t), (t * 7.3, t * 0.1)] {
            let floor = field.get_floor(x, y);
            if span.contains(&x) && span.contains(&y) {
                assert!(floor <= config.max_level_height);
            } else {
                assert_eq!(floor, outside, "({x}, {y})");
            }
        }
    }
    for (x, y) in [(f32::MAX, 0.0), (f32::MIN, f32::MIN), (0.0, f32::INFINITY)] {
        assert_eq!(field.get_floor(x, y), outside);
    }
}
