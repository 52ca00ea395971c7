//! Display-flush and touch-input bridge between a software-rendered GUI toolkit
//! and a TFT panel with a resistive digitizer.
//!
//! The [`display::FlushAdapter`] moves rendered regions into a panel's
//! windowed-write protocol, the [`touch::PointerAdapter`] turns raw digitizer
//! samples into pointer events in display space.
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod diagnostics;
pub mod display;
pub mod geometry;
pub mod touch;

pub use display::{DisplaySink, FlushAdapter, WindowedDisplay};
pub use geometry::Area;
pub use touch::{PointerAdapter, PointerEvent, PointerSource, PointerState, TouchSensor};
