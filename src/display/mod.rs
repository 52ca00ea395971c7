//! This module is responsible for transferring rendered pixels to the panel

mod line_buffer_provider;
pub mod panel;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::{raw::RawU16, Rgb565},
    primitives::{PointsIter, Rectangle},
    Pixel,
};
use slint::platform::software_renderer::Rgb565Pixel;

use crate::geometry::Area;
pub use line_buffer_provider::LineBufferFlusher;

/// A display controller that accepts pixels through an addressing window.
pub trait WindowedDisplay {
    type Error: core::fmt::Debug;

    /// Sets the addressing window to `area`, then streams `colors` into it
    /// one pixel at a time. The controller advances its write pointer in
    /// row-major order.
    fn write_window<I>(&mut self, area: Area, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Rgb565>;

    fn size(&self) -> Size;
}

/// Pixel representations the flush path accepts.
pub trait ToRgb565: Copy {
    fn to_rgb565(self) -> Rgb565;
}

impl ToRgb565 for Rgb565 {
    fn to_rgb565(self) -> Rgb565 {
        self
    }
}

impl ToRgb565 for Rgb565Pixel {
    fn to_rgb565(self) -> Rgb565 {
        RawU16::new(self.0).into()
    }
}

/// Where the graphics engine presents rendered regions.
pub trait DisplaySink {
    type Error;

    /// Presents `pixels`, row-major, into `area`.
    ///
    /// The call blocks until every pixel has been handed to the device, the
    /// engine may reuse the buffer as soon as it returns.
    fn flush<P: ToRgb565>(&mut self, area: Area, pixels: &[P]) -> Result<(), Self::Error>;
}

/// Bridges engine flushes to a [`WindowedDisplay`].
pub struct FlushAdapter<D> {
    display: D,
    flushed_pixels: u32,
}

impl<D> FlushAdapter<D>
where
    D: WindowedDisplay,
{
    pub fn new(display: D) -> Self {
        Self {
            display,
            flushed_pixels: 0,
        }
    }

    /// Pixels handed to the device since startup, wraps on overflow.
    pub fn flushed_pixels(&self) -> u32 {
        self.flushed_pixels
    }

    pub fn into_inner(self) -> D {
        self.display
    }

    fn stream(
        &mut self,
        area: Area,
        colors: impl IntoIterator<Item = Rgb565>,
    ) -> Result<(), D::Error> {
        let flushed_pixels = &mut self.flushed_pixels;
        self.display.write_window(
            area,
            colors
                .into_iter()
                .take(area.pixel_count())
                .inspect(|_| *flushed_pixels = flushed_pixels.wrapping_add(1)),
        )
    }
}

impl<D> DisplaySink for FlushAdapter<D>
where
    D: WindowedDisplay,
{
    type Error = D::Error;

    fn flush<P: ToRgb565>(&mut self, area: Area, pixels: &[P]) -> Result<(), Self::Error> {
        debug_assert!(area.fits_in(self.display.size()));
        debug_assert_eq!(pixels.len(), area.pixel_count());
        trace!(
            "Flush ({}, {}) - ({}, {})",
            area.x1,
            area.y1,
            area.x2,
            area.y2
        );
        self.stream(area, pixels.iter().map(|p| p.to_rgb565()))
    }
}

impl<D> OriginDimensions for FlushAdapter<D>
where
    D: WindowedDisplay,
{
    fn size(&self) -> Size {
        self.display.size()
    }
}

impl<D> DrawTarget for FlushAdapter<D>
where
    D: WindowedDisplay,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let size = self.display.size();
        let bounds = Area::screen(size.width as u16, size.height as u16);
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
                continue;
            };
            if bounds.contains(x, y) {
                self.stream(Area::new(x, y, x, y), [color])?;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let visible = area.intersection(&self.bounding_box());
        let Ok(window) = Area::try_from(visible) else {
            return Ok(());
        };

        if visible == *area {
            self.stream(window, colors)
        } else {
            self.stream(
                window,
                area.points()
                    .zip(colors)
                    .filter(|(point, _)| visible.contains(*point))
                    .map(|(_, color)| color),
            )
        }
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let size = self.display.size();
        let screen = Area::screen(size.width as u16, size.height as u16);
        self.stream(screen, core::iter::repeat(color))
    }
}
