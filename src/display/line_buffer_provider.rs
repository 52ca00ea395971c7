use core::ops::Range;

use slint::platform::software_renderer::{LineBufferProvider, Rgb565Pixel};

use super::{DisplaySink, FlushAdapter, WindowedDisplay};
use crate::fmt::Debug2Format;
use crate::geometry::Area;

/// Lets the software renderer draw line by line into a scratch buffer and
/// flushes every finished line range to the panel.
///
/// The panel keeps the previous frame in its own memory, so only the
/// line ranges the renderer reports as dirty ever cross the bus.
pub struct LineBufferFlusher<'a, D> {
    pub adapter: &'a mut FlushAdapter<D>,
    pub line_buffer: &'a mut [Rgb565Pixel],
}

impl<D> LineBufferProvider for LineBufferFlusher<'_, D>
where
    D: WindowedDisplay,
{
    type TargetPixel = Rgb565Pixel;

    fn process_line(
        &mut self,
        line: usize,
        range: Range<usize>,
        render_fn: impl FnOnce(&mut [Self::TargetPixel]),
    ) {
        let Some(pixels) = self.line_buffer.get_mut(range.clone()) else {
            error!(
                "Line range {}..{} exceeds the line buffer",
                range.start,
                range.end
            );
            return;
        };
        render_fn(pixels);

        let Some(area) = u16::try_from(line).ok().and_then(|y| Area::row(y, range)) else {
            return;
        };
        if let Err(e) = self.adapter.flush(area, pixels) {
            error!("Failed to flush line {} => {}", line, Debug2Format(&e));
        }
    }
}
