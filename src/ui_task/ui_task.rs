extern crate alloc;

use defmt::*;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::peripherals;
use embassy_nrf::{self, bind_interrupts, spim};
use embassy_time::{Delay, Duration, Instant, Ticker};
use embedded_alloc::LlffHeap as Heap;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_hal_bus::spi::ExclusiveDevice;
use hello_tft::config::{
    DIAGNOSTIC_PERIOD_TICKS, DISPLAY_HEIGHT, DISPLAY_WIDTH, TICK_PERIOD_MS, TOUCH_PRESSURE_THRESHOLD,
    TOUCH_RAW_MAX, TOUCH_RAW_MIN, TOUCH_SWAP_XY,
};
use hello_tft::diagnostics::HeapReporter;
use hello_tft::display::{FlushAdapter, LineBufferFlusher};
use hello_tft::touch::xpt2046::Xpt2046;
use mipidsi::models::ILI9488Rgb666;
use mipidsi::options::{ColorOrder, Orientation, Rotation};
use hello_tft::touch::{AxisCalibration, Calibration, PointerAdapter, PointerSource, WindowEventBridge};
use slint::platform::software_renderer::{MinimalSoftwareWindow, RepaintBufferType, Rgb565Pixel};
use slint::platform::Platform;
use slint::ComponentHandle;
use static_cell::StaticCell;

use super::extensions::PrintableWindowEvent;
use super::{DisplayHardwareInterface, TouchHardwareInterface};

slint::include_modules!();

bind_interrupts!(struct Irqs {
    SERIAL2 => spim::InterruptHandler<peripherals::SERIAL2>;
    SPIM4 => spim::InterruptHandler<peripherals::SPIM4>;
});

struct HelloTftPlatform {
    window: alloc::rc::Rc<MinimalSoftwareWindow>,
}

impl Platform for HelloTftPlatform {
    fn create_window_adapter(
        &self,
    ) -> Result<alloc::rc::Rc<dyn slint::platform::WindowAdapter>, slint::PlatformError> {
        // Since on MCUs, there can be only one window, just return a clone of self.window.
        // We'll also use the same window in the event loop.
        Ok(self.window.clone())
    }

    fn duration_since_start(&self) -> core::time::Duration {
        Instant::now()
            .duration_since(Instant::from_micros(0))
            .into()
    }

    fn debug_log(&self, arguments: core::fmt::Arguments) {
        use alloc::string::ToString;
        info!("[SLINT] {=str}", arguments.to_string().as_str());
    }
}

#[embassy_executor::task]
pub async fn ui_task_runner(
    display_hw: DisplayHardwareInterface<'static>,
    touch_hw: TouchHardwareInterface<'static>,
    heap: &'static Heap,
) {
    info!("Hello UI task...");

    info!("Initializing display & touch ...");
    let mut backlight = Output::new(display_hw.backlight, Level::Low, OutputDrive::Standard);
    let display_reset = Output::new(display_hw.reset, Level::Low, OutputDrive::Standard);
    let display_dc = Output::new(display_hw.dc, Level::Low, OutputDrive::HighDrive);
    let display_cs = Output::new(display_hw.cs, Level::High, OutputDrive::HighDrive);

    let mut config = spim::Config::default();
    config.frequency = spim::Frequency::M32;
    config.mode = spim::MODE_0;
    let spim: spim::Spim<'_, peripherals::SPIM4> = spim::Spim::new_txonly(
        display_hw.spi,
        Irqs,
        display_hw.clk,
        display_hw.mosi,
        config,
    );
    let exclusive_spim = ExclusiveDevice::new(spim, display_cs, Delay)
        .expect("The SPIM creation should be successful");
    static DISPLAY_SPI_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();
    let interface = mipidsi::interface::SpiInterface::new(
        exclusive_spim,
        display_dc,
        DISPLAY_SPI_BUFFER.init([0; 512]),
    );

    info!("Initializing...");
    // The serial interface of the ILI9488 only accepts 18-bit pixels
    let panel = mipidsi::Builder::new(ILI9488Rgb666, interface)
        .reset_pin(display_reset)
        .display_size(DISPLAY_HEIGHT, DISPLAY_WIDTH)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .color_order(ColorOrder::Bgr)
        .init(&mut Delay);
    let panel = unwrap!(panel.ok());

    let mut display = FlushAdapter::new(panel);
    // Clear the screen
    unwrap!(display.clear(Rgb565::BLACK).ok());
    info!("TFT initialized.");

    let mut config = spim::Config::default();
    config.frequency = spim::Frequency::M2;
    config.mode = spim::MODE_0;
    let touch_spim: spim::Spim<'_, peripherals::SERIAL2> = spim::Spim::new(
        touch_hw.spi,
        Irqs,
        touch_hw.clk,
        touch_hw.miso,
        touch_hw.mosi,
        config,
    );
    let touch_cs = Output::new(touch_hw.cs, Level::High, OutputDrive::Standard);
    let touch_device = ExclusiveDevice::new(touch_spim, touch_cs, Delay)
        .expect("The SPIM creation should be successful");

    let calibration = Calibration::new(
        AxisCalibration::new(TOUCH_RAW_MIN.0, TOUCH_RAW_MAX.0),
        AxisCalibration::new(TOUCH_RAW_MIN.1, TOUCH_RAW_MAX.1),
        Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32),
    )
    .expect("The touch calibration should cover a non-empty range")
    .with_swapped_axes(TOUCH_SWAP_XY);
    let mut pointer = PointerAdapter::new(
        Xpt2046::new(touch_device, TOUCH_PRESSURE_THRESHOLD),
        calibration,
    );
    let mut window_events = WindowEventBridge::new();

    info!("Creating UI...");

    // Note that we use `ReusedBuffer` as parameter for MinimalSoftwareWindow to indicate
    // that we just need to re-render what changed since the last frame.
    // What's shown on the screen buffer is not in our RAM, but actually within the display itself.
    // Only the changed part of the screen will be updated.
    let window = MinimalSoftwareWindow::new(RepaintBufferType::ReusedBuffer);

    static LINE_BUFFER: StaticCell<[Rgb565Pixel; DISPLAY_WIDTH as usize]> = StaticCell::new();
    let line_buffer = LINE_BUFFER.init([Rgb565Pixel(0); DISPLAY_WIDTH as usize]);

    unwrap!(slint::platform::set_platform(alloc::boxed::Box::new(HelloTftPlatform {
        window: window.clone(),
    }))
    .ok());

    let ui = HelloWindow::new().expect("Unable to create the main window");
    window.set_size(slint::PhysicalSize::new(
        DISPLAY_WIDTH as u32,
        DISPLAY_HEIGHT as u32,
    ));
    unwrap!(ui.show().ok());
    info!("GUI created.");

    info!("Backlight on...");
    backlight.set_high();

    let mut heap_reporter = HeapReporter::new(heap, DIAGNOSTIC_PERIOD_TICKS);
    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
    loop {
        // Let Slint run the timer hooks and update animations.
        slint::platform::update_timers_and_animations();

        if let Some(event) = pointer.poll() {
            for event in window_events.translate(event, window.scale_factor()) {
                debug!("Event {}", PrintableWindowEvent(&event));
                window.dispatch_event(event);
            }
        }

        // Draw the scene if something needs to be drawn.
        window.draw_if_needed(|renderer| {
            renderer.render_by_line(LineBufferFlusher {
                adapter: &mut display,
                line_buffer: &mut line_buffer[..],
            });
        });

        heap_reporter.tick();
        ticker.next().await;
    }
}
