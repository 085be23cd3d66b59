/*
 * The pedestrian request button.
 *
 * The button is sampled on every pass of the control loop. A press counts
 * when the input goes from low to high and the previous accepted press lies
 * more than the debounce window in the past. The window runs from the last
 * *accepted* edge, not the last raw edge, so contact bounce after a press is
 * swallowed while a real second press only has to wait out one window.
 */

use embassy_time::Duration;

use crate::clock::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// A digital input that reads `High` while the button is pressed.
pub trait ButtonInput {
    fn read_level(&mut self) -> Level;
}

pub struct DebouncedButton<B> {
    input: B,
    debounce: Duration,
    previous: Level,
    last_accepted: Millis,
}

impl<B: ButtonInput> DebouncedButton<B> {
    /// A button sampled from `now` on. Startup counts as the last accepted
    /// press, so nothing registers within the first debounce window.
    pub fn new(input: B, debounce: Duration, now: Millis) -> Self {
        DebouncedButton {
            input,
            debounce,
            previous: Level::Low,
            last_accepted: now,
        }
    }

    /// Sample the input once. Returns `true` when this sample is an accepted
    /// press.
    pub fn poll(&mut self, now: Millis) -> bool {
        let current = self.input.read_level();
        let accepted = current == Level::High
            && self.previous == Level::Low
            && self.outside_window(now);
        if accepted {
            self.last_accepted = now;
            debug!("button: press accepted at {} ms", now.as_u32());
        }
        self.previous = current;
        accepted
    }

    fn outside_window(&self, now: Millis) -> bool {
        u64::from(now.elapsed_since(self.last_accepted)) > self.debounce.as_millis()
    }

    pub fn last_accepted(&self) -> Millis {
        self.last_accepted
    }

    pub fn input_mut(&mut self) -> &mut B {
        &mut self.input
    }
}
