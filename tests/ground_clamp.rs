//! Property: after every tick each dynamic body stands on or above the floor.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rstest::rstest;
use spritefield::world::Session;
use test_utils::seeded_session;

const KEYS: [&str; 5] = ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", " "];

fn assert_grounded(session: &Session, tick: usize) {
    let level = session.level();
    for &id in session.collisions().dynamic_ids() {
        let pose = session.bodies().get(id).expect("registered body").pose();
        let floor_z = level.floor_z(pose.x, pose.y);
        assert!(
            pose.z >= floor_z && pose.z >= 0.0,
            "tick {tick}: body {id:?} at z {} below floor {floor_z}",
            pose.z
        );
    }
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(2024)]
fn bodies_never_sink_below_the_floor(#[case] seed: u64) {
    let mut session = seeded_session(seed, 16);
    let mut driver = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);
    assert_grounded(&session, 0);

    for tick in 1..=400 {
        if tick % 25 == 0 {
            let key = KEYS[driver.gen_range(0..KEYS.len())];
            let pressed = driver.gen_bool(0.6);
            session.input_mut().on_key(key, pressed);
        }
        let ms = driver.gen_range(0.0..80.0);
        session.tick(ms);
        assert_grounded(&session, tick);
    }
}
