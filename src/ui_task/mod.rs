mod extensions;
mod ui_task;
use embassy_nrf::{gpio::AnyPin, peripherals, PeripheralRef};
pub(crate) use ui_task::ui_task_runner;

pub(crate) struct DisplayHardwareInterface<'a> {
    pub reset: AnyPin,
    pub backlight: AnyPin,
    pub cs: AnyPin,
    pub dc: AnyPin,
    pub mosi: AnyPin,
    pub clk: AnyPin,
    pub spi: PeripheralRef<'a, peripherals::SPIM4>,
}

pub(crate) struct TouchHardwareInterface<'a> {
    pub cs: AnyPin,
    pub clk: AnyPin,
    pub mosi: AnyPin,
    pub miso: AnyPin,
    pub spi: PeripheralRef<'a, peripherals::SERIAL2>,
}
