pub mod sequencer;

use enum_ordinalize::Ordinalize;

use crate::button::{ButtonInput, DebouncedButton};
use crate::clock::{Clock, sleep_for};
use crate::config::{ConfigError, CrossingConfig};
use crate::light::{DutyOutput, Light, LightBank};
use crate::min_green::MinGreenTimer;
use sequencer::{Phase, run_cycle};

/// The whole crossing: lights, request button, minimum-green timer and the
/// clock they all run on.
pub struct Crossing<O, B, C> {
    config: CrossingConfig,
    lights: LightBank<O>,
    button: DebouncedButton<B>,
    min_green: MinGreenTimer,
    clock: C,
    pending: bool,
    cycles: u32,
}

impl<O, B, C> Crossing<O, B, C>
where
    O: DutyOutput,
    B: ButtonInput,
    C: Clock,
{
    /// Check `config` and bring the lights up in the idle state: car green
    /// and pedestrian red. `outputs` are given in `Light` order.
    pub fn new(
        config: CrossingConfig,
        outputs: [O; Light::VARIANT_COUNT],
        button: B,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut lights = LightBank::new(outputs, config.brightness);
        lights.all_pedestrian_off();
        lights.on(Light::PedestrianRed);
        lights.all_car_off();
        lights.on(Light::CarGreen);

        let now = clock.now();
        let min_green = MinGreenTimer::new(Phase::CarGreen.duration(&config), now);
        info!("crossing: idle, car green");

        Ok(Crossing {
            config,
            lights,
            button: DebouncedButton::new(button, config.debounce, now),
            min_green,
            clock,
            pending: false,
            cycles: 0,
        })
    }

    /*
     * One pass of the control loop: sample the button and, if a request is
     * waiting and cars have had their minimum green, run a full cycle.
     * The timer is checked on every pass, request or not, so it latches
     * before the tick counter can wrap. Returns whether a cycle ran.
     */
    pub async fn poll(&mut self) -> bool {
        let now = self.clock.now();
        let green_served = self.min_green.is_satisfied(now);
        if self.button.poll(now) && !self.pending {
            self.pending = true;
            info!("crossing: pedestrian request at {} ms", now.as_u32());
        }

        if !self.pending || !green_served {
            return false;
        }

        self.pending = false;
        run_cycle(&self.config, &mut self.lights, &mut self.clock).await;
        let finished = self.clock.now();
        self.min_green.reset(finished);
        self.cycles = self.cycles.wrapping_add(1);
        info!(
            "crossing: cycle {} done at {} ms",
            self.cycles,
            finished.as_u32()
        );
        true
    }

    pub async fn run(&mut self) -> ! {
        loop {
            self.poll().await;
            sleep_for(&mut self.clock, self.config.poll_interval).await;
        }
    }

    pub fn config(&self) -> &CrossingConfig {
        &self.config
    }

    pub fn lights(&self) -> &LightBank<O> {
        &self.lights
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn min_green(&self) -> &MinGreenTimer {
        &self.min_green
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles
    }

    pub fn button_mut(&mut self) -> &mut B {
        self.button.input_mut()
    }
}
