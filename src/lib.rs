#![cfg_attr(not(test), no_std)]

/*
 * Control logic for a pedestrian crossing: five dimmable lights, one request
 * button and a sequencer that walks the lights through the crossing cycle.
 *
 * Nothing in this library touches a specific chip. The hardware is reached
 * through the small capability traits in `clock`, `light` and `button`, so the
 * same code drives the STM32 board in `main.rs` and the fakes in the tests.
 */

#[macro_use]
mod fmt;

pub mod button;
pub mod clock;
pub mod config;
pub mod crossing;
pub mod light;
pub mod min_green;

pub use button::{ButtonInput, DebouncedButton, Level};
pub use clock::{Clock, EmbassyClock, Millis, sleep_until};
pub use config::{ConfigError, CrossingConfig};
pub use crossing::Crossing;
pub use crossing::sequencer::{Phase, run_cycle};
pub use light::{DutyOutput, Light, LightBank, LightChannel};
pub use min_green::MinGreenTimer;
