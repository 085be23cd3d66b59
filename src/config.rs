/*
 * Crossing timings and brightness.
 *
 * Everything is fixed at compile time. `validate` runs once before the
 * controller starts, so a bad value stops the board at boot instead of
 * leaving the lights half way through a cycle.
 */

use core::fmt;

use embassy_time::Duration;
use enum_ordinalize::Ordinalize;

use crate::light::Light;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct CrossingConfig {
    /// Brightness in percent, indexed by `Light` ordinal.
    pub brightness: [u8; Light::VARIANT_COUNT],
    pub pwm_frequency_hz: u32,
    pub min_car_green: Duration,
    pub car_orange: Duration,
    pub all_red: Duration,
    /// Whole pedestrian green time, blinking included.
    pub pedestrian_green_total: Duration,
    /// Blinking tail of the pedestrian green. Zero disables blinking.
    pub pedestrian_green_blink: Duration,
    pub blink_interval: Duration,
    pub debounce: Duration,
    pub poll_interval: Duration,
}

impl CrossingConfig {
    pub const DEFAULT: CrossingConfig = CrossingConfig {
        // car green, car orange, car red, pedestrian red, pedestrian green
        brightness: [1, 10, 10, 10, 1],
        pwm_frequency_hz: 1_000,
        min_car_green: Duration::from_secs(1),
        car_orange: Duration::from_secs(2),
        all_red: Duration::from_secs(1),
        pedestrian_green_total: Duration::from_secs(5),
        pedestrian_green_blink: Duration::from_secs(3),
        blink_interval: Duration::from_millis(300),
        debounce: Duration::from_millis(200),
        poll_interval: Duration::from_millis(10),
    };

    pub fn brightness_of(&self, light: Light) -> u8 {
        self.brightness[light.ordinal()]
    }

    /// Blinking happens only when it is switched on and shorter than the
    /// whole green time. Anything else runs the green steady.
    pub fn blink_enabled(&self) -> bool {
        self.pedestrian_green_blink.as_millis() > 0
            && self.pedestrian_green_total > self.pedestrian_green_blink
    }

    /// Steady part of the pedestrian green.
    pub fn pedestrian_green_steady(&self) -> Duration {
        if self.blink_enabled() {
            self.pedestrian_green_total - self.pedestrian_green_blink
        } else {
            self.pedestrian_green_total
        }
    }

    /// Length of a complete crossing cycle, from request to car green.
    pub fn cycle_duration(&self) -> Duration {
        self.car_orange + self.all_red + self.pedestrian_green_total + self.all_red
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(light) = Light::VARIANTS
            .iter()
            .find(|light| self.brightness_of(**light) > 100)
        {
            return Err(ConfigError::BrightnessOutOfRange(*light));
        }
        if self.pwm_frequency_hz == 0 {
            return Err(ConfigError::ZeroPwmFrequency);
        }
        if self.blink_interval.as_millis() == 0 {
            return Err(ConfigError::ZeroBlinkInterval);
        }
        if self.poll_interval.as_millis() == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.pedestrian_green_blink.as_millis() > 0 && !self.blink_enabled() {
            warn!(
                "config: blink {} ms not shorter than green {} ms, running steady",
                self.pedestrian_green_blink.as_millis(),
                self.pedestrian_green_total.as_millis()
            );
        }
        Ok(())
    }
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum ConfigError {
    BrightnessOutOfRange(Light),
    ZeroPwmFrequency,
    ZeroBlinkInterval,
    ZeroPollInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BrightnessOutOfRange(light) => {
                write!(f, "brightness of {:?} exceeds 100%", light)
            }
            ConfigError::ZeroPwmFrequency => f.write_str("PWM frequency must be non-zero"),
            ConfigError::ZeroBlinkInterval => f.write_str("blink interval must be non-zero"),
            ConfigError::ZeroPollInterval => f.write_str("poll interval must be non-zero"),
        }
    }
}

impl core::error::Error for ConfigError {}
