//! Panels driven through `mipidsi`

use embedded_graphics::{
    geometry::{OriginDimensions, Size},
    pixelcolor::Rgb565,
};
use embedded_hal::digital::OutputPin;
use mipidsi::{
    interface::{Interface, InterfacePixelFormat},
    models::Model,
    Display,
};

use super::WindowedDisplay;
use crate::geometry::Area;

impl<DI, M, RST> WindowedDisplay for Display<DI, M, RST>
where
    DI: Interface,
    DI::Error: core::fmt::Debug,
    M: Model,
    M::ColorFormat: InterfacePixelFormat<DI::Word> + From<Rgb565>,
    RST: OutputPin,
{
    type Error = DI::Error;

    fn write_window<I>(&mut self, area: Area, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        // CASET/PASET take inclusive bounds, as `Area` does
        self.set_pixels(
            area.x1,
            area.y1,
            area.x2,
            area.y2,
            colors
                .into_iter()
                .map(<M::ColorFormat as From<Rgb565>>::from),
        )
    }

    fn size(&self) -> Size {
        OriginDimensions::size(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplaySink, FlushAdapter};
    use core::convert::Infallible;
    use embedded_graphics::pixelcolor::RgbColor;
    use embedded_hal::delay::DelayNs;
    use mipidsi::{
        interface::InterfaceKind,
        models::{ILI9488Rgb565, ILI9488Rgb666},
        options::{Orientation, Rotation},
        Builder,
    };
    use std::{cell::RefCell, rc::Rc};

    #[derive(Clone, Debug, PartialEq)]
    enum Tx {
        Command(u8, Vec<u8>),
        Pixel(Vec<u8>),
    }

    /// Shares its log, the display keeps the interface.
    #[derive(Clone, Default)]
    struct RecordingInterface {
        log: Rc<RefCell<Vec<Tx>>>,
    }

    impl RecordingInterface {
        fn take(&self) -> Vec<Tx> {
            self.log.take()
        }
    }

    impl Interface for RecordingInterface {
        type Word = u8;
        type Error = Infallible;

        const KIND: InterfaceKind = InterfaceKind::Serial4Line;

        fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), Self::Error> {
            self.log
                .borrow_mut()
                .push(Tx::Command(command, args.to_vec()));
            Ok(())
        }

        fn send_pixels<const N: usize>(
            &mut self,
            pixels: impl IntoIterator<Item = [Self::Word; N]>,
        ) -> Result<(), Self::Error> {
            let mut log = self.log.borrow_mut();
            for pixel in pixels {
                log.push(Tx::Pixel(pixel.to_vec()));
            }
            Ok(())
        }

        fn send_repeated_pixel<const N: usize>(
            &mut self,
            pixel: [Self::Word; N],
            count: u32,
        ) -> Result<(), Self::Error> {
            self.send_pixels((0..count).map(|_| pixel))
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn landscape<M: Model>(model: M, interface: RecordingInterface) -> impl WindowedDisplay
    where
        M::ColorFormat: InterfacePixelFormat<u8> + From<Rgb565>,
    {
        let display = Builder::new(model, interface.clone())
            .display_size(320, 480)
            .orientation(Orientation::new().rotate(Rotation::Deg90))
            .init(&mut NoDelay)
            .unwrap();
        interface.take();
        display
    }

    #[test]
    fn landscape_panel_is_480_by_320() {
        let display = landscape(ILI9488Rgb666, RecordingInterface::default());

        assert_eq!(display.size(), Size::new(480, 320));
    }

    #[test]
    fn window_is_addressed_with_inclusive_bounds_then_streamed() {
        let interface = RecordingInterface::default();
        let mut display = landscape(ILI9488Rgb565, interface.clone());

        display
            .write_window(
                Area::new(0x10, 2, 0x1DF, 2),
                [Rgb565::RED, Rgb565::BLUE],
            )
            .unwrap();

        assert_eq!(
            interface.take(),
            vec![
                Tx::Command(0x2A, vec![0x00, 0x10, 0x01, 0xDF]),
                Tx::Command(0x2B, vec![0x00, 0x02, 0x00, 0x02]),
                Tx::Command(0x2C, vec![]),
                Tx::Pixel(vec![0xF8, 0x00]),
                Tx::Pixel(vec![0x00, 0x1F]),
            ]
        );
    }

    #[test]
    fn rgb666_panel_takes_three_bytes_per_pixel() {
        let interface = RecordingInterface::default();
        let mut adapter = FlushAdapter::new(landscape(ILI9488Rgb666, interface.clone()));
        let area = Area::new(0, 0, 3, 1);

        adapter.flush(area, &[Rgb565::WHITE; 8]).unwrap();

        let pixels: Vec<_> = interface
            .take()
            .into_iter()
            .filter_map(|tx| match tx {
                Tx::Pixel(bytes) => Some(bytes),
                Tx::Command(..) => None,
            })
            .collect();
        assert_eq!(pixels.len(), area.pixel_count());
        assert!(pixels.iter().all(|bytes| bytes.len() == 3));
    }
}
