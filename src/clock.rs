/*
 * Time for the crossing.
 *
 * All timing runs off a free-running 32-bit millisecond counter. The counter
 * wraps after about 49.7 days, so timestamps are only ever compared through
 * wrapping differences, never through plain `<` or `-`.
 *
 * Waiting is cooperative: `sleep_until` pauses in short steps until a
 * deadline passes. The clock is a trait so that the tests can swap in a fake
 * clock that advances simulated time instead of sleeping.
 */

use core::future::Future;

use embassy_time::{Duration, Instant, Timer};

/// Longest single pause taken while waiting for a deadline.
pub const SLEEP_STEP: Duration = Duration::from_millis(5);

/// A reading of the wrapping millisecond counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The timestamp `duration` after this one, wrapping around the counter.
    pub const fn wrapping_add(self, duration: Duration) -> Millis {
        Millis(self.0.wrapping_add(duration.as_millis() as u32))
    }

    /// Milliseconds elapsed from `earlier` up to `self`.
    pub const fn elapsed_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Milliseconds left until `deadline`, negative once it has passed.
    pub const fn until(self, deadline: Millis) -> i32 {
        deadline.0.wrapping_sub(self.0) as i32
    }

    pub const fn has_reached(self, deadline: Millis) -> bool {
        self.until(deadline) <= 0
    }
}

pub trait Clock {
    fn now(&self) -> Millis;

    /// Yield for roughly `duration`. Called with short durations only.
    fn pause(&mut self, duration: Duration) -> impl Future<Output = ()>;
}

/// Wait until `deadline`, pausing at most `SLEEP_STEP` at a time.
pub async fn sleep_until<C: Clock>(clock: &mut C, deadline: Millis) {
    loop {
        let now = clock.now();
        if now.has_reached(deadline) {
            break;
        }
        let step = SLEEP_STEP.as_millis().min(now.until(deadline) as u64);
        clock.pause(Duration::from_millis(step)).await;
    }
}

/// Wait for `duration` measured from now.
pub async fn sleep_for<C: Clock>(clock: &mut C, duration: Duration) {
    let deadline = clock.now().wrapping_add(duration);
    sleep_until(clock, deadline).await;
}

/// The real clock, backed by the embassy time driver.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

impl EmbassyClock {
    pub const fn new() -> Self {
        EmbassyClock
    }
}

impl Clock for EmbassyClock {
    fn now(&self) -> Millis {
        // Truncation is intended: the counter wraps like a hardware tick.
        Millis(Instant::now().as_millis() as u32)
    }

    fn pause(&mut self, duration: Duration) -> impl Future<Output = ()> {
        Timer::after(duration)
    }
}
