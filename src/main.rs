#![cfg_attr(target_os = "none", no_main)]
#![cfg_attr(target_os = "none", no_std)]

#[cfg(target_os = "none")]
use core::fmt::Write;
#[cfg(target_os = "none")]
use cortex_m_rt::entry;
#[cfg(target_os = "none")]
use panic_halt as _;

#[cfg(target_os = "none")]
use hal::{
    pac,
    prelude::*,
    serial::{Config, Instance, Serial},
};
#[cfg(target_os = "none")]
use stm32f7xx_hal as hal;

#[cfg(target_os = "none")]
use rcpwm::{
    config::{self, DeviceConfig, DEVICES},
    drivers::Device,
    hw::{PwmChannel, Usart},
    protocol::{Dispatcher, LineReader, ReplySink},
};

#[cfg(target_os = "none")]
#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // GPIO
    let gpioa = dp.GPIOA.split();
    let gpiod = dp.GPIOD.split();

    // USART1 (DBG)
    let dbg_tx = gpioa.pa9.into_alternate::<7>();
    let dbg_rx = gpioa.pa10.into_alternate::<7>();
    let dbg_cfg = Config {
        baud_rate: config::DEBUG_BAUD.bps(),
        ..Default::default()
    };
    let mut dbg = Usart::new(Serial::new(dp.USART1, (dbg_tx, dbg_rx), &clocks, dbg_cfg));

    // USART3 (ST-LINK VCP) command console
    let tx = gpiod.pd8.into_alternate::<7>();
    let rx = gpiod.pd9.into_alternate::<7>();
    let console_cfg = Config {
        baud_rate: config::CONSOLE_BAUD.bps(),
        ..Default::default()
    };
    let mut console = Usart::new(Serial::new(dp.USART3, (tx, rx), &clocks, console_cfg));

    // TIM4 CH1..CH4 (PD12..PD15), 1 MHz tick so duty == pulse width in us
    let pwm_pins = (
        gpiod.pd12.into_alternate::<2>(),
        gpiod.pd13.into_alternate::<2>(),
        gpiod.pd14.into_alternate::<2>(),
        gpiod.pd15.into_alternate::<2>(),
    );
    let (mut ch1, mut ch2, mut ch3, mut ch4) = dp
        .TIM4
        .pwm_us(pwm_pins, config::SERVO_FRAME_US.micros(), &clocks)
        .split();

    let _ = writeln!(
        dbg,
        "rcpwm: {} devices, {} Hz PWM tick, {} us frame\r",
        DEVICES.len(),
        config::PWM_TICK_HZ,
        config::SERVO_FRAME_US
    );

    let mut devices = [
        device(&DEVICES[0], &mut ch1),
        device(&DEVICES[1], &mut ch2),
        device(&DEVICES[2], &mut ch3),
        device(&DEVICES[3], &mut ch4),
    ];

    for (slot, dev) in devices.iter().enumerate() {
        let range = dev.range();
        let _ = writeln!(
            dbg,
            "  {} : {} {}..{} us, initial {} us\r",
            slot,
            dev.label(),
            range.min_us(),
            range.max_us(),
            dev.pulse_us()
        );
    }

    let mut dispatcher = Dispatcher::new(&mut devices);
    dispatcher.register_all();

    let mut reader = LineReader::<{ config::RX_BUFFER_LEN }>::new();

    loop {
        let Some(byte) = console.read_byte() else {
            cortex_m::asm::nop();
            continue;
        };

        if let Some(line) = reader.push(byte) {
            dbg.trace("> ", line);
            let mut sink = Traced {
                console: &mut console,
                dbg: &mut dbg,
            };
            dispatcher.receive(line, &mut sink);
        }
    }
}

#[cfg(target_os = "none")]
fn device<'d>(cfg: &DeviceConfig, channel: &'d mut dyn PwmChannel) -> Device<'d> {
    Device::new(cfg.label, channel, cfg.range).with_initial_pulse_us(cfg.initial_pulse_us)
}

/// Console transport that echoes every reply to the debug terminal.
#[cfg(target_os = "none")]
struct Traced<'a, C: Instance, D: Instance> {
    console: &'a mut Usart<C>,
    dbg: &'a mut Usart<D>,
}

#[cfg(target_os = "none")]
impl<C: Instance, D: Instance> ReplySink for Traced<'_, C, D> {
    fn send(&mut self, bytes: &[u8]) {
        self.console.send(bytes);
        self.dbg.trace("< ", bytes);
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    println!("rcpwm is firmware: build it with --target thumbv7em-none-eabihf");
}
