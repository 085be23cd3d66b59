#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossing::{
    ButtonInput, Clock, Crossing, CrossingConfig, DutyOutput, Level, Light, Millis,
    clock::sleep_for,
};
use embassy_futures::block_on;
use embassy_time::Duration;
use enum_ordinalize::Ordinalize;

pub const MAX_LEVEL: u16 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub at: u32,
    pub light: Light,
    pub level: u16,
}

/// Simulated time shared by the clock, the lights and the button.
#[derive(Clone, Default)]
pub struct SimTime(Rc<Cell<u32>>);

impl SimTime {
    pub fn starting_at(ms: u32) -> Self {
        SimTime(Rc::new(Cell::new(ms)))
    }

    pub fn now(&self) -> u32 {
        self.0.get()
    }

    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }
}

pub struct SimClock {
    time: SimTime,
}

impl Clock for SimClock {
    fn now(&self) -> Millis {
        Millis(self.time.now())
    }

    async fn pause(&mut self, duration: Duration) {
        let next = self.time.now().wrapping_add(duration.as_millis() as u32);
        self.time.0.set(next);
    }
}

pub struct Recorder {
    light: Light,
    time: SimTime,
    log: Rc<RefCell<Vec<Event>>>,
}

impl DutyOutput for Recorder {
    fn max_level(&self) -> u16 {
        MAX_LEVEL
    }

    fn apply_level(&mut self, level: u16) {
        self.log.borrow_mut().push(Event {
            at: self.time.now(),
            light: self.light,
            level,
        });
    }
}

/// Button held down during each `[start, end)` window.
pub struct ScriptedButton {
    time: SimTime,
    presses: Vec<(u32, u32)>,
}

impl ButtonInput for ScriptedButton {
    fn read_level(&mut self) -> Level {
        let now = self.time.now();
        Level::from(
            self.presses
                .iter()
                .any(|(start, end)| (*start..*end).contains(&now)),
        )
    }
}

pub type SimCrossing = Crossing<Recorder, ScriptedButton, SimClock>;

pub struct Bench {
    pub time: SimTime,
    pub log: Rc<RefCell<Vec<Event>>>,
    pub crossing: SimCrossing,
}

impl Bench {
    pub fn new(config: CrossingConfig, start: u32, presses: &[(u32, u32)]) -> Self {
        let time = SimTime::starting_at(start);
        let log = Rc::new(RefCell::new(Vec::new()));
        let outputs = std::array::from_fn(|index| Recorder {
            light: Light::VARIANTS[index],
            time: time.clone(),
            log: log.clone(),
        });
        let button = ScriptedButton {
            time: time.clone(),
            presses: presses.to_vec(),
        };
        let clock = SimClock { time: time.clone() };
        let crossing = Crossing::new(config, outputs, button, clock).expect("valid config");
        Bench {
            time,
            log,
            crossing,
        }
    }

    /// Run the control loop the way `Crossing::run` does until `ms` of
    /// simulated time have passed since the bench started.
    pub fn run_for(&mut self, ms: u32) {
        let start = self.time.now();
        while self.time.now().wrapping_sub(start) < ms {
            block_on(self.step());
        }
    }

    /// Jump straight to `ms` and run a single pass of the control loop.
    pub fn poll_at(&mut self, ms: u32) -> bool {
        self.time.set(ms);
        block_on(self.crossing.poll())
    }

    async fn step(&mut self) {
        let poll_interval = self.crossing.config().poll_interval;
        self.crossing.poll().await;
        let mut clock = SimClock {
            time: self.time.clone(),
        };
        sleep_for(&mut clock, poll_interval).await;
    }

    /// Moments `light` switched between dark and lit, starting from dark.
    pub fn transitions(&self, light: Light) -> Vec<(u32, bool)> {
        let mut lit = false;
        let mut changes = Vec::new();
        for event in self.log.borrow().iter().filter(|e| e.light == light) {
            let now_lit = event.level > 0;
            if now_lit != lit {
                changes.push((event.at, now_lit));
                lit = now_lit;
            }
        }
        changes
    }

    /// Replay every output write and check the lights never show a
    /// conflicting combination.
    pub fn assert_never_conflicting(&self) {
        let mut lit = [false; Light::VARIANT_COUNT];
        for event in self.log.borrow().iter() {
            lit[event.light.ordinal()] = event.level > 0;
            let car_green = lit[Light::CarGreen.ordinal()];
            assert!(
                !(car_green && lit[Light::PedestrianGreen.ordinal()]),
                "car green and walk lit together at {} ms",
                event.at
            );
            assert!(
                !(car_green && lit[Light::CarRed.ordinal()]),
                "car green and car red lit together at {} ms",
                event.at
            );
        }
    }
}
