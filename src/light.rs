/*
 * Dimmable lights.
 *
 * Every lamp at the crossing sits on a PWM channel. A `LightChannel` remembers
 * the brightness it was configured with and whether it is lit, and writes the
 * matching duty level to its output: zero while off, the configured level
 * while on. Switching a light never touches its brightness.
 *
 * The five channels live together in a `LightBank`, indexed by `Light`.
 */

use enum_ordinalize::Ordinalize;

/// Something that can be driven at a duty level between 0 and `max_level`.
pub trait DutyOutput {
    fn max_level(&self) -> u16;

    fn apply_level(&mut self, level: u16);
}

/// The role of each lamp at the crossing.
#[derive(Ordinalize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
#[repr(usize)]
pub enum Light {
    CarGreen,
    CarOrange,
    CarRed,
    PedestrianRed,
    PedestrianGreen,
}

pub struct LightChannel<O> {
    output: O,
    percent: u8,
    level: u16,
    on: bool,
}

impl<O: DutyOutput> LightChannel<O> {
    /// A dark channel set to `percent` brightness.
    pub fn new(output: O, percent: i32) -> Self {
        let mut channel = LightChannel {
            output,
            percent: 0,
            level: 0,
            on: false,
        };
        channel.configure(percent);
        channel.off();
        channel
    }

    /// Set the brightness, clamped to 0..=100 percent. A lit channel picks up
    /// the new level straight away.
    pub fn configure(&mut self, percent: i32) {
        self.percent = percent.clamp(0, 100) as u8;
        self.level = level_for(self.percent, self.output.max_level());
        if self.on {
            self.output.apply_level(self.level);
        }
    }

    pub fn on(&mut self) {
        self.output.apply_level(self.level);
        self.on = true;
    }

    pub fn off(&mut self) {
        self.output.apply_level(0);
        self.on = false;
    }

    pub fn toggle(&mut self) {
        if self.on {
            self.off();
        } else {
            self.on();
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Duty level applied while the channel is lit.
    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

fn level_for(percent: u8, max_level: u16) -> u16 {
    (u32::from(percent) * u32::from(max_level) / 100) as u16
}

pub struct LightBank<O> {
    channels: [LightChannel<O>; Light::VARIANT_COUNT],
}

impl<O: DutyOutput> LightBank<O> {
    /// Wrap one output per `Light`, in declaration order, each with the
    /// brightness found at the same position in `brightness`. All lights
    /// start off.
    pub fn new(
        outputs: [O; Light::VARIANT_COUNT],
        brightness: [u8; Light::VARIANT_COUNT],
    ) -> Self {
        let mut index = 0;
        let channels = outputs.map(|output| {
            let channel = LightChannel::new(output, i32::from(brightness[index]));
            index += 1;
            channel
        });
        LightBank { channels }
    }

    pub fn channel(&self, light: Light) -> &LightChannel<O> {
        &self.channels[light.ordinal()]
    }

    pub fn channel_mut(&mut self, light: Light) -> &mut LightChannel<O> {
        &mut self.channels[light.ordinal()]
    }

    pub fn on(&mut self, light: Light) {
        self.channel_mut(light).on();
    }

    pub fn off(&mut self, light: Light) {
        self.channel_mut(light).off();
    }

    pub fn toggle(&mut self, light: Light) {
        self.channel_mut(light).toggle();
    }

    pub fn is_on(&self, light: Light) -> bool {
        self.channel(light).is_on()
    }

    pub fn all_car_off(&mut self) {
        self.off(Light::CarGreen);
        self.off(Light::CarOrange);
        self.off(Light::CarRed);
    }

    pub fn all_pedestrian_off(&mut self) {
        self.off(Light::PedestrianGreen);
        self.off(Light::PedestrianRed);
    }
}
