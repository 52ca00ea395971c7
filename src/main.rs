#![no_std]
#![no_main]
extern crate alloc;

mod ui_task;
use core::ptr::addr_of_mut;

use defmt::*;
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin as _;
use embassy_nrf::{pac, Peripheral};
use embassy_time::Timer;
use embedded_alloc::LlffHeap as Heap;
use hello_tft::config::HEAP_SIZE;

use {defmt_rtt as _, panic_probe as _};

#[global_allocator]
static HEAP: Heap = Heap::empty();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Initialize the allocator BEFORE you use it
    {
        use core::mem::MaybeUninit;
        static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
        unsafe { HEAP.init(addr_of_mut!(HEAP_MEM) as usize, HEAP_SIZE) }
    }

    let p = embassy_nrf::init(Default::default());

    info!("Hello TFT!");

    let div = pac::clock::vals::Hclk::DIV1; // Desired Main clock divider (aka 128MHz)
    pac::CLOCK.hfclkctrl().write(|w| w.set_hclk(div));
    let cpu_clock_speed = 128 / (pac::CLOCK.hfclkctrl().read().hclk() as u8 + 1);
    info!("Running at {}MHz", cpu_clock_speed);

    let display_hw = ui_task::DisplayHardwareInterface {
        #[cfg(feature = "hw-board-dk")]
        reset: p.P0_21.degrade(),
        #[cfg(feature = "hw-board-zs")]
        reset: p.P0_03.degrade(),
        backlight: p.P0_23.degrade(),
        cs: p.P0_12.degrade(),
        dc: p.P0_11.degrade(),
        mosi: p.P0_09.degrade(),
        clk: p.P0_08.degrade(),
        spi: p.SPIM4.into_ref(),
    };

    let touch_hw = ui_task::TouchHardwareInterface {
        cs: p.P1_01.degrade(),
        #[cfg(feature = "hw-board-dk")]
        clk: p.P1_08.degrade(),
        #[cfg(feature = "hw-board-zs")]
        clk: p.P1_03.degrade(),
        #[cfg(feature = "hw-board-dk")]
        mosi: p.P1_07.degrade(),
        #[cfg(feature = "hw-board-zs")]
        mosi: p.P1_02.degrade(),
        miso: p.P1_04.degrade(),
        spi: p.SERIAL2.into_ref(),
    };

    info!("Spawning UI task...");
    unwrap!(spawner.spawn(ui_task::ui_task_runner(display_hw, touch_hw, &HEAP)));

    loop {
        trace!("Main loop has still nothing to do...");
        Timer::after_secs(10).await;
    }
}
