/*
 * The crossing cycle.
 *
 * A cycle walks the lights from car green through orange, all red, walk,
 * an optional blinking walk and a second all red back to car green. Each
 * phase switches lights off before it switches new ones on, so a car green
 * and a walk signal, or a car green and a car red, are never lit together.
 *
 * `run_cycle` only returns once car green is back. Nothing polls the button
 * while it runs, so a committed crossing cannot be cut short or extended.
 */

use embassy_time::Duration;

use crate::clock::{Clock, sleep_for, sleep_until};
use crate::config::CrossingConfig;
use crate::light::{DutyOutput, Light, LightBank};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Phase {
    CarGreen,
    CarOrange,
    AllRedToWalk,
    Walk,
    WalkBlink,
    AllRedToDrive,
}

impl Phase {
    /*
     * Determine the phase after this one, without running anything.
     */
    pub fn next(self, config: &CrossingConfig) -> Phase {
        match self {
            Phase::CarGreen => Phase::CarOrange,
            Phase::CarOrange => Phase::AllRedToWalk,
            Phase::AllRedToWalk => Phase::Walk,
            Phase::Walk if config.blink_enabled() => Phase::WalkBlink,
            Phase::Walk => Phase::AllRedToDrive,
            Phase::WalkBlink => Phase::AllRedToDrive,
            Phase::AllRedToDrive => Phase::CarGreen,
        }
    }

    /// How long the phase holds. Car green is the minimum before the next
    /// request may be served.
    pub fn duration(self, config: &CrossingConfig) -> Duration {
        match self {
            Phase::CarGreen => config.min_car_green,
            Phase::CarOrange => config.car_orange,
            Phase::AllRedToWalk | Phase::AllRedToDrive => config.all_red,
            Phase::Walk => config.pedestrian_green_steady(),
            Phase::WalkBlink if config.blink_enabled() => config.pedestrian_green_blink,
            Phase::WalkBlink => Duration::from_millis(0),
        }
    }

    fn enter<O: DutyOutput>(self, lights: &mut LightBank<O>) {
        match self {
            Phase::CarGreen => {
                lights.off(Light::CarRed);
                lights.on(Light::CarGreen);
            }
            Phase::CarOrange => {
                lights.off(Light::CarGreen);
                lights.on(Light::CarOrange);
            }
            Phase::AllRedToWalk => {
                lights.off(Light::CarOrange);
                lights.on(Light::CarRed);
                lights.on(Light::PedestrianRed);
            }
            Phase::Walk => {
                lights.off(Light::PedestrianRed);
                lights.on(Light::PedestrianGreen);
            }
            // Blinking starts from the lit walk signal.
            Phase::WalkBlink => {}
            Phase::AllRedToDrive => {
                lights.off(Light::PedestrianGreen);
                lights.on(Light::PedestrianRed);
            }
        }
    }
}

/// Run one complete crossing cycle, starting from car green and ending once
/// car green is lit again.
pub async fn run_cycle<O, C>(config: &CrossingConfig, lights: &mut LightBank<O>, clock: &mut C)
where
    O: DutyOutput,
    C: Clock,
{
    info!(
        "crossing: cycle of {} ms starting",
        config.cycle_duration().as_millis()
    );
    let mut phase = Phase::CarGreen;
    loop {
        phase = phase.next(config);
        info!("crossing: {} at {} ms", phase, clock.now().as_u32());
        phase.enter(lights);

        match phase {
            Phase::CarGreen => break,
            Phase::WalkBlink => {
                blink(
                    lights,
                    clock,
                    phase.duration(config),
                    config.blink_interval,
                )
                .await
            }
            _ => sleep_for(clock, phase.duration(config)).await,
        }
    }
}

/*
 * Toggle the walk signal every `interval`, starting right away, until
 * `length` has passed. Toggles sit on a fixed grid from the start so the
 * blinking lasts exactly `length`, and the signal always ends dark. A zero
 * interval is treated as one millisecond.
 */
async fn blink<O, C>(lights: &mut LightBank<O>, clock: &mut C, length: Duration, interval: Duration)
where
    O: DutyOutput,
    C: Clock,
{
    let start = clock.now();
    let length_ms = length.as_millis();
    let interval_ms = interval.as_millis().max(1);
    let mut elapsed_ms = 0;

    while elapsed_ms < length_ms {
        lights.toggle(Light::PedestrianGreen);
        elapsed_ms += interval_ms;
        let deadline = start.wrapping_add(Duration::from_millis(elapsed_ms.min(length_ms)));
        sleep_until(clock, deadline).await;
    }

    lights.off(Light::PedestrianGreen);
}
