mod support;

use crossing::{CrossingConfig, Light, Millis};
use embassy_time::Duration;
use support::Bench;

const PRESS: (u32, u32) = (2_000, 2_100);

#[test]
fn default_cycle_follows_the_exact_timeline() {
    let mut bench = Bench::new(CrossingConfig::DEFAULT, 0, &[PRESS]);

    bench.run_for(12_000);

    assert_eq!(
        bench.transitions(Light::CarGreen),
        [(0, true), (2_000, false), (11_000, true)]
    );
    assert_eq!(
        bench.transitions(Light::CarOrange),
        [(2_000, true), (4_000, false)]
    );
    assert_eq!(
        bench.transitions(Light::CarRed),
        [(4_000, true), (11_000, false)]
    );
    assert_eq!(
        bench.transitions(Light::PedestrianRed),
        [(0, true), (5_000, false), (10_000, true)]
    );
    assert_eq!(
        bench.transitions(Light::PedestrianGreen),
        [
            (5_000, true),
            // steady for two seconds, then a toggle every 300 ms
            (7_000, false),
            (7_300, true),
            (7_600, false),
            (7_900, true),
            (8_200, false),
            (8_500, true),
            (8_800, false),
            (9_100, true),
            (9_400, false),
            (9_700, true),
            (10_000, false),
        ]
    );
    assert_eq!(bench.crossing.cycles_completed(), 1);
    bench.assert_never_conflicting();
}

#[test]
fn timer_restarts_when_car_green_returns() {
    let mut bench = Bench::new(CrossingConfig::DEFAULT, 0, &[PRESS]);

    bench.run_for(12_000);

    assert_eq!(bench.crossing.min_green().started(), Millis(11_000));
    assert!(!bench.crossing.is_pending());
}

#[test]
fn zero_blink_keeps_walk_steady() {
    let config = CrossingConfig {
        pedestrian_green_blink: Duration::from_secs(0),
        ..CrossingConfig::DEFAULT
    };
    let mut bench = Bench::new(config, 0, &[PRESS]);

    bench.run_for(12_000);

    assert_eq!(
        bench.transitions(Light::PedestrianGreen),
        [(5_000, true), (10_000, false)]
    );
    assert_eq!(
        bench.transitions(Light::CarGreen),
        [(0, true), (2_000, false), (11_000, true)]
    );
    bench.assert_never_conflicting();
}

#[test]
fn blink_longer_than_walk_runs_steady() {
    let config = CrossingConfig {
        pedestrian_green_blink: Duration::from_secs(7),
        ..CrossingConfig::DEFAULT
    };
    let mut bench = Bench::new(config, 0, &[PRESS]);

    bench.run_for(12_000);

    assert_eq!(
        bench.transitions(Light::PedestrianGreen),
        [(5_000, true), (10_000, false)]
    );
    bench.assert_never_conflicting();
}

#[test]
fn cycle_runs_across_counter_wraparound() {
    let start = u32::MAX - 2_999;
    let press_at = start + 2_000;
    let mut bench = Bench::new(CrossingConfig::DEFAULT, start, &[(press_at, press_at + 100)]);

    bench.run_for(12_000);

    let car_green_back = press_at.wrapping_add(9_000);
    assert_eq!(
        bench.transitions(Light::CarGreen),
        [(start, true), (press_at, false), (car_green_back, true)]
    );
    assert_eq!(bench.crossing.min_green().started(), Millis(car_green_back));
    assert_eq!(bench.transitions(Light::PedestrianGreen).len(), 12);
    bench.assert_never_conflicting();
}

#[test]
fn lights_keep_their_brightness_through_a_cycle() {
    let mut bench = Bench::new(CrossingConfig::DEFAULT, 0, &[PRESS]);

    bench.run_for(12_000);

    let lights = bench.crossing.lights();
    assert_eq!(lights.channel(Light::CarGreen).level(), 10);
    assert_eq!(lights.channel(Light::CarOrange).level(), 100);
    assert_eq!(lights.channel(Light::PedestrianGreen).level(), 10);
    let lit_levels: Vec<u16> = bench
        .log
        .borrow()
        .iter()
        .filter(|event| event.light == Light::PedestrianGreen && event.level > 0)
        .map(|event| event.level)
        .collect();
    assert!(lit_levels.iter().all(|level| *level == 10));
}
