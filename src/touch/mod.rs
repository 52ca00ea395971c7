//! Touch input: calibration of raw digitizer samples and pointer event generation

mod window_events;
pub mod xpt2046;

use embedded_graphics::geometry::{Point, Size};

use crate::fmt::Debug2Format;

pub use window_events::WindowEventBridge;

/// An unscaled digitizer reading.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub x: u16,
    pub y: u16,
    pub pressure: u16,
}

/// A digitizer the pointer adapter can poll.
pub trait TouchSensor {
    type Error: core::fmt::Debug;

    fn is_touched(&mut self) -> Result<bool, Self::Error>;

    fn read_raw(&mut self) -> Result<RawSample, Self::Error>;
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointerState {
    Pressed,
    Released,
}

/// A pointer position in display coordinates.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointerEvent {
    pub position: Point,
    pub state: PointerState,
}

/// Where the graphics engine pulls pointer input from, once per tick.
pub trait PointerSource {
    fn poll(&mut self) -> Option<PointerEvent>;
}

/// Raw readings at the two edges of one axis.
///
/// `raw_min` maps to pixel 0 and `raw_max` to the resolution. An axis
/// mounted the other way round simply has `raw_min > raw_max`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisCalibration {
    pub raw_min: u16,
    pub raw_max: u16,
}

impl AxisCalibration {
    pub const fn new(raw_min: u16, raw_max: u16) -> Self {
        Self { raw_min, raw_max }
    }

    /// Rounds towards negative infinity, so that readings just past
    /// `raw_min` land on -1 instead of 0.
    fn map(&self, raw: u16, resolution: u32) -> i64 {
        let span = self.raw_max as i64 - self.raw_min as i64;
        let scaled = (raw as i64 - self.raw_min as i64) * resolution as i64;
        if span < 0 {
            (-scaled).div_euclid(-span)
        } else {
            scaled.div_euclid(span)
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// `raw_min == raw_max` on one axis.
    EmptyRange,
    ZeroResolution,
}

/// Maps raw digitizer samples to display pixels.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    x: AxisCalibration,
    y: AxisCalibration,
    resolution: Size,
    swap_xy: bool,
}

impl Calibration {
    pub fn new(
        x: AxisCalibration,
        y: AxisCalibration,
        resolution: Size,
    ) -> Result<Self, CalibrationError> {
        if x.raw_min == x.raw_max || y.raw_min == y.raw_max {
            return Err(CalibrationError::EmptyRange);
        }
        if resolution.width == 0 || resolution.height == 0 {
            return Err(CalibrationError::ZeroResolution);
        }
        Ok(Self {
            x,
            y,
            resolution,
            swap_xy: false,
        })
    }

    /// Reads the sensor's X channel as the display's Y axis and vice versa,
    /// before the axis calibrations are applied.
    pub fn with_swapped_axes(mut self, swap_xy: bool) -> Self {
        self.swap_xy = swap_xy;
        self
    }

    pub fn resolution(&self) -> Size {
        self.resolution
    }

    /// Converts a sample to display coordinates.
    ///
    /// Returns `None` when the result falls outside
    /// `[0, width) x [0, height)`. Samples are not clamped: an out-of-range
    /// result means the calibration does not cover the panel edge.
    pub fn map(&self, sample: RawSample) -> Option<Point> {
        let (raw_x, raw_y) = if self.swap_xy {
            (sample.y, sample.x)
        } else {
            (sample.x, sample.y)
        };
        let x = self.x.map(raw_x, self.resolution.width);
        let y = self.y.map(raw_y, self.resolution.height);

        let in_range = (0..self.resolution.width as i64).contains(&x)
            && (0..self.resolution.height as i64).contains(&y);
        in_range.then(|| Point::new(x as i32, y as i32))
    }
}

/// Polls a [`TouchSensor`] and reports calibrated pointer events.
///
/// The only state kept between polls is the last reported position, so that
/// lifting the finger produces exactly one [`PointerState::Released`] event.
pub struct PointerAdapter<T> {
    sensor: T,
    calibration: Calibration,
    last_position: Option<Point>,
}

impl<T> PointerAdapter<T>
where
    T: TouchSensor,
{
    pub fn new(sensor: T, calibration: Calibration) -> Self {
        Self {
            sensor,
            calibration,
            last_position: None,
        }
    }

    /// Whether the last reported event was a press.
    pub fn is_pressed(&self) -> bool {
        self.last_position.is_some()
    }

    pub fn into_inner(self) -> T {
        self.sensor
    }

    fn sample(&mut self) -> Result<Option<PointerEvent>, T::Error> {
        if !self.sensor.is_touched()? {
            return Ok(self.last_position.take().map(|position| PointerEvent {
                position,
                state: PointerState::Released,
            }));
        }

        let sample = self.sensor.read_raw()?;
        let Some(position) = self.calibration.map(sample) else {
            warn!(
                "Touch sample ({}, {}) is outside of the calibrated area",
                sample.x,
                sample.y
            );
            return Ok(None);
        };
        trace!(
            "Touch ({}, {}) p={} => ({}, {})",
            sample.x,
            sample.y,
            sample.pressure,
            position.x,
            position.y
        );

        self.last_position = Some(position);
        Ok(Some(PointerEvent {
            position,
            state: PointerState::Pressed,
        }))
    }
}

impl<T> PointerSource for PointerAdapter<T>
where
    T: TouchSensor,
{
    fn poll(&mut self) -> Option<PointerEvent> {
        match self.sample() {
            Ok(event) => event,
            Err(e) => {
                error!("Touch read error => {}", Debug2Format(&e));
                None
            }
        }
    }
}
