//! Inclusive pixel rectangles as used by display controllers.

use core::ops::Range;

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

/// A rectangular pixel region with inclusive bounds.
///
/// This is the shape of a controller's addressing window: a single pixel is
/// `x1 == x2 && y1 == y2`, there is no empty area.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Area {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Area {
    /// Creates an area, swapping bounds that are given in reverse order.
    pub const fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self { x1, y1, x2, y2 }
    }

    /// The area covering a whole `width` x `height` screen.
    ///
    /// Both dimensions must be non-zero.
    pub const fn screen(width: u16, height: u16) -> Self {
        Self::new(0, 0, width.saturating_sub(1), height.saturating_sub(1))
    }

    /// A single row `y`, spanning the half-open column range `columns`.
    ///
    /// Returns `None` for an empty range.
    pub fn row(y: u16, columns: Range<usize>) -> Option<Self> {
        if columns.is_empty() {
            return None;
        }
        let x1 = u16::try_from(columns.start).ok()?;
        let x2 = u16::try_from(columns.end - 1).ok()?;
        Some(Self::new(x1, y, x2, y))
    }

    pub const fn width(&self) -> u32 {
        (self.x2 - self.x1) as u32 + 1
    }

    pub const fn height(&self) -> u32 {
        (self.y2 - self.y1) as u32 + 1
    }

    /// Number of pixels a buffer for this area must hold.
    pub const fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Whether the area fits in a `size` screen anchored at the origin.
    pub const fn fits_in(&self, size: Size) -> bool {
        (self.x2 as u32) < size.width && (self.y2 as u32) < size.height
    }

    /// Pixel coordinates in row-major order, the order controllers expect
    /// pixels after the window has been set.
    pub fn points(&self) -> impl Iterator<Item = (u16, u16)> {
        let Area { x1, y1, x2, y2 } = *self;
        (y1..=y2).flat_map(move |y| (x1..=x2).map(move |x| (x, y)))
    }
}

impl TryFrom<Rectangle> for Area {
    type Error = ();

    /// Fails for zero-sized rectangles and for rectangles reaching outside
    /// the `u16` coordinate space.
    fn try_from(rectangle: Rectangle) -> Result<Self, Self::Error> {
        let bottom_right = rectangle.bottom_right().ok_or(())?;
        let x1 = u16::try_from(rectangle.top_left.x).map_err(|_| ())?;
        let y1 = u16::try_from(rectangle.top_left.y).map_err(|_| ())?;
        let x2 = u16::try_from(bottom_right.x).map_err(|_| ())?;
        let y2 = u16::try_from(bottom_right.y).map_err(|_| ())?;
        Ok(Self { x1, y1, x2, y2 })
    }
}

impl From<Area> for Rectangle {
    fn from(area: Area) -> Self {
        Rectangle::new(
            Point::new(area.x1 as i32, area.y1 as i32),
            Size::new(area.width(), area.height()),
        )
    }
}
