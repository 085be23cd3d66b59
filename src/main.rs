#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

// Pin assignments on the DESPI-M02 (STM32F103VE):
//
//   car green          PA6   TIM3 CH1
//   car orange         PA7   TIM3 CH2
//   car red            PB0   TIM3 CH3
//   pedestrian red     PB1   TIM3 CH4
//   pedestrian green   PB6   TIM4 CH1
//   request button     PE11  input, pull-up, pressed = low
//   on-board LED       PE12  active-low

#[cfg(target_os = "none")]
mod io;

#[cfg(target_os = "none")]
use {defmt_rtt as _, panic_halt as _};

#[cfg(target_os = "none")]
#[embassy_executor::main]
async fn main(_spawner: embassy_executor::Spawner) {
    use crossing::{Crossing, CrossingConfig, EmbassyClock};
    use embassy_stm32::{
        gpio::{Input, OutputType, Pull},
        time::Hertz,
        timer::{
            low_level::CountingMode,
            simple_pwm::{PwmPin, SimplePwm},
        },
    };
    use io::{PwmLight, RequestButton};

    const CONFIG: CrossingConfig = CrossingConfig::DEFAULT;

    let p = embassy_stm32::init(Default::default());
    defmt::info!("crossing: board up");

    let pwm_frequency = Hertz(CONFIG.pwm_frequency_hz);
    let tim3 = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new_ch1(p.PA6, OutputType::PushPull)),
        Some(PwmPin::new_ch2(p.PA7, OutputType::PushPull)),
        Some(PwmPin::new_ch3(p.PB0, OutputType::PushPull)),
        Some(PwmPin::new_ch4(p.PB1, OutputType::PushPull)),
        pwm_frequency,
        CountingMode::EdgeAlignedUp,
    )
    .split();
    let tim4 = SimplePwm::new(
        p.TIM4,
        Some(PwmPin::new_ch1(p.PB6, OutputType::PushPull)),
        None,
        None,
        None,
        pwm_frequency,
        CountingMode::EdgeAlignedUp,
    )
    .split();

    // Same order as `crossing::Light`.
    let lights = [
        PwmLight::tim3(tim3.ch1),
        PwmLight::tim3(tim3.ch2),
        PwmLight::tim3(tim3.ch3),
        PwmLight::tim3(tim3.ch4),
        PwmLight::tim4(tim4.ch1),
    ];
    let button = RequestButton::new(Input::new(p.PE11, Pull::Up));

    let mut crossing = Crossing::new(CONFIG, lights, button, EmbassyClock::new())
        .expect("crossing configuration");

    let _status_led = io::status_led_on(p.PE12);

    crossing.run().await
}

#[cfg(not(target_os = "none"))]
fn main() {}
