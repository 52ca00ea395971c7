//! Compile-time configuration of the demo.

/// Panel resolution in landscape orientation.
pub const DISPLAY_WIDTH: u16 = 480;
pub const DISPLAY_HEIGHT: u16 = 320;

/// Raw digitizer reading at the left/top edge of the panel.
pub const TOUCH_RAW_MIN: (u16, u16) = (300, 300);
/// Raw digitizer reading at the right/bottom edge of the panel.
pub const TOUCH_RAW_MAX: (u16, u16) = (4000, 4000);
/// The XPT2046 X plate runs along the short side of the panel in landscape.
pub const TOUCH_SWAP_XY: bool = true;
/// Minimal `z1 + 4095 - z2` reading considered a contact.
pub const TOUCH_PRESSURE_THRESHOLD: u16 = 350;

/// Period of the UI loop.
pub const TICK_PERIOD_MS: u64 = 5;
/// Number of UI loop iterations between two heap reports.
pub const DIAGNOSTIC_PERIOD_TICKS: u32 = 200;

pub const HEAP_SIZE: usize = 48 * 1024;
