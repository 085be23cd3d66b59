/*
 * The I/O module for the crossing.
 *
 * This module wraps the actual pins on the DESPI-M02 board so that the
 * crossing logic can drive them through the library's capability traits. The
 * intention is for this module, together with the pin table in `main.rs`, to
 * be the only part of the program that is device-specific.
 *
 * All five lamps are dimmed through hardware PWM. Four of them sit on TIM3
 * and the walk signal sits on TIM4, so a light is one of two channel types.
 */

use crossing::{ButtonInput, DutyOutput, Level};
use embassy_stm32::{
    gpio::{self, Input, Output, Speed},
    peripherals::{PE12, TIM3, TIM4},
    timer::simple_pwm::SimplePwmChannel,
};

pub enum PwmLight {
    Tim3(SimplePwmChannel<'static, TIM3>),
    Tim4(SimplePwmChannel<'static, TIM4>),
}

impl PwmLight {
    pub fn tim3(mut channel: SimplePwmChannel<'static, TIM3>) -> Self {
        channel.set_duty_cycle(0);
        channel.enable();
        PwmLight::Tim3(channel)
    }

    pub fn tim4(mut channel: SimplePwmChannel<'static, TIM4>) -> Self {
        channel.set_duty_cycle(0);
        channel.enable();
        PwmLight::Tim4(channel)
    }
}

impl DutyOutput for PwmLight {
    fn max_level(&self) -> u16 {
        match self {
            PwmLight::Tim3(channel) => channel.max_duty_cycle(),
            PwmLight::Tim4(channel) => channel.max_duty_cycle(),
        }
    }

    fn apply_level(&mut self, level: u16) {
        match self {
            PwmLight::Tim3(channel) => channel.set_duty_cycle(level),
            PwmLight::Tim4(channel) => channel.set_duty_cycle(level),
        }
    }
}

/// Push button wired to ground with the internal pull-up, so a pressed
/// button reads low on the pin.
pub struct RequestButton {
    pin: Input<'static>,
}

impl RequestButton {
    pub fn new(pin: Input<'static>) -> Self {
        RequestButton { pin }
    }
}

impl ButtonInput for RequestButton {
    fn read_level(&mut self) -> Level {
        Level::from(self.pin.is_low())
    }
}

/// Switch the on-board LED on and hand back the pin, which must be kept
/// alive for the LED to stay lit.
pub fn status_led_on(pin: PE12) -> Output<'static> {
    // the on-board LED is active-low
    Output::new(pin, gpio::Level::Low, Speed::Low)
}
