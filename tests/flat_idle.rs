//! Scenario: a body on flat ground with no input never drifts.

use approx::assert_relative_eq;
use test_utils::flat_session;

#[test]
fn idle_player_stays_put_for_a_thousand_ticks() {
    let mut session = flat_session(24, 2, 0);
    let start = *session.player_body().expect("player").pose();
    assert_relative_eq!(start.z, 1.0);

    for _ in 0..1000 {
        session.tick(16.0);
        let pose = session.player_body().expect("player").pose();
        assert_relative_eq!(pose.z, 1.0);
    }

    let end = session.player_body().expect("player").pose();
    assert_eq!(end, &start);
    assert_eq!(session.ticks(), 1000);
    assert_relative_eq!(session.elapsed_ms(), 16_000.0);
}

#[test]
fn idle_player_on_the_water_line_stays_put() {
    let mut session = flat_session(16, 0, 0);
    for _ in 0..1000 {
        session.tick(16.0);
    }
    let pose = session.player_body().expect("player").pose();
    assert_relative_eq!(pose.z, 0.0);
    assert_relative_eq!(pose.x, 0.0);
    assert_relative_eq!(pose.y, 0.0);
}
