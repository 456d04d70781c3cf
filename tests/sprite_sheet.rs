//! Sprite-sheet offsets, frame wrapping and facing totality.

use approx::assert_relative_eq;
use rstest::rstest;
use spritefield::sprite::{Direction, DirectionsToRows, SpriteSheet};
use spritefield::vector_math::normalize_angle;

fn three_by_four() -> SpriteSheet {
    SpriteSheet {
        cols: 3,
        rows: 4,
        total_frames: 3,
        frame_duration_ms: 100.0,
        directions_to_rows: DirectionsToRows {
            down: Some(0.0),
            ..DirectionsToRows::default()
        },
    }
}

#[test]
fn documented_offset_for_frame_one_point_seven() {
    let offset = three_by_four().texture_offset(1.7, Direction::Down);
    assert_relative_eq!(offset.x, 1.0 / 3.0);
    assert_relative_eq!(offset.y, 3.0 / 4.0);
}

#[rstest]
#[case(0.0, 0.0)]
#[case(2.99, 2.0 / 3.0)]
fn columns_follow_the_frame(#[case] frame: f32, #[case] x: f32) {
    let offset = three_by_four().texture_offset(frame, Direction::Down);
    assert_relative_eq!(offset.x, x);
}

#[test]
fn frames_always_wrap_into_range() {
    for duration in [1.0_f32, 16.0, 120.0, 1000.0] {
        let sheet = SpriteSheet {
            frame_duration_ms: duration,
            ..three_by_four()
        };
        let mut frame = 0.0;
        for step in 0_u16..500 {
            frame = sheet.advance_frame(frame, f32::from(step % 97) * 3.7);
            assert!((0.0..3.0).contains(&frame), "frame {frame} at {duration} ms");
        }
    }
}

#[test]
fn every_angle_maps_to_one_direction() {
    for body in -40_i16..=40 {
        for reference in -40_i16..=40 {
            let relative = f32::from(body) * 0.37 - f32::from(reference) * 0.29;
            let direction = Direction::from_relative_angle(relative);
            assert!(Direction::ALL.contains(&direction));
        }
    }
    for angle in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, f32::MAX] {
        assert!(Direction::ALL.contains(&Direction::from_relative_angle(angle)));
    }
}

#[test]
fn normalized_angles_are_in_range_and_stable() {
    for step in -500_i16..=500 {
        let angle = f32::from(step) * 0.173;
        let once = normalize_angle(angle);
        assert!((0.0..std::f32::consts::TAU).contains(&once), "{angle} -> {once}");
        assert_eq!(normalize_angle(once), once);
    }
}
