/*
 * Minimum car-green guarantee.
 *
 * Cars keep green for at least `minimum` after every crossing cycle, no
 * matter how often the button is pressed. Once the minimum has passed the
 * timer latches, so a wrap of the millisecond counter cannot turn it back
 * off before the next reset.
 */

use embassy_time::Duration;

use crate::clock::Millis;

#[derive(Debug, Clone, Copy)]
pub struct MinGreenTimer {
    minimum: Duration,
    started: Millis,
    satisfied: bool,
}

impl MinGreenTimer {
    pub fn new(minimum: Duration, now: Millis) -> Self {
        MinGreenTimer {
            minimum,
            started: now,
            satisfied: minimum.as_millis() == 0,
        }
    }

    /// Restart the timer: car green became active at `now`.
    pub fn reset(&mut self, now: Millis) {
        self.started = now;
        self.satisfied = self.minimum.as_millis() == 0;
    }

    pub fn is_satisfied(&mut self, now: Millis) -> bool {
        if !self.satisfied {
            self.satisfied = u64::from(now.elapsed_since(self.started)) >= self.minimum.as_millis();
        }
        self.satisfied
    }

    pub fn started(&self) -> Millis {
        self.started
    }
}
