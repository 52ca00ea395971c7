//! XPT2046 resistive touch panel controller

use embedded_hal::spi::SpiDevice;

use super::{RawSample, TouchSensor};

/// Conversion channels, as complete control bytes.
///
/// START, 12-bit, differential reference, power-down between conversions
/// with PENIRQ enabled.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u8)]
enum Channel {
    X = 0xD0,
    Y = 0x90,
    Z1 = 0xB0,
    Z2 = 0xC0,
}

impl Channel {
    fn command(self) -> u8 {
        self as u8
    }
}

const ADC_MAX: u16 = 0x0FFF;

/// XPT2046 driver
pub struct Xpt2046<SPI> {
    spi: SPI,
    pressure_threshold: u16,
}

impl<SPI> Xpt2046<SPI>
where
    SPI: SpiDevice,
{
    /// `pressure_threshold` is the minimal [`pressure`](Self::pressure)
    /// reported as a contact.
    pub fn new(spi: SPI, pressure_threshold: u16) -> Self {
        Self {
            spi,
            pressure_threshold,
        }
    }

    /// Contact pressure, 0 when nothing touches the panel.
    pub fn pressure(&mut self) -> Result<u16, SPI::Error> {
        let z1 = self.read_channel(Channel::Z1)?;
        let z2 = self.read_channel(Channel::Z2)?;
        Ok(z1 + (ADC_MAX - z2))
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    fn read_channel(&mut self, channel: Channel) -> Result<u16, SPI::Error> {
        let tx = [channel.command(), 0, 0];
        let mut rx = [0u8; 3];
        self.spi.transfer(&mut rx, &tx)?;
        // The 12 bit result is left aligned after the busy cycle
        Ok((u16::from_be_bytes([rx[1], rx[2]]) >> 3) & ADC_MAX)
    }
}

impl<SPI> TouchSensor for Xpt2046<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn is_touched(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressure()? >= self.pressure_threshold)
    }

    fn read_raw(&mut self) -> Result<RawSample, Self::Error> {
        // The first conversion after the driver switch is still settling
        let _ = self.read_channel(Channel::X)?;
        let x = self.read_channel(Channel::X)?;
        let y = self.read_channel(Channel::Y)?;
        let pressure = self.pressure()?;
        Ok(RawSample { x, y, pressure })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::{ErrorType, Operation};

    /// Answers every conversion with a fixed value per channel.
    struct FakeAdc {
        x: u16,
        y: u16,
        z1: u16,
        z2: u16,
        commands: Vec<u8>,
    }

    impl FakeAdc {
        fn new(x: u16, y: u16, z1: u16, z2: u16) -> Self {
            Self {
                x,
                y,
                z1,
                z2,
                commands: Vec::new(),
            }
        }
    }

    impl ErrorType for FakeAdc {
        type Error = Infallible;
    }

    impl SpiDevice for FakeAdc {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            for operation in operations {
                if let Operation::Transfer(read, write) = operation {
                    let value = match write[0] {
                        0xD0 => self.x,
                        0x90 => self.y,
                        0xB0 => self.z1,
                        0xC0 => self.z2,
                        other => panic!("unexpected control byte {other:#04x}"),
                    };
                    self.commands.push(write[0]);
                    let [hi, lo] = (value << 3).to_be_bytes();
                    read[0] = 0;
                    read[1] = hi;
                    read[2] = lo;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn untouched_panel_reads_no_pressure() {
        let mut touch = Xpt2046::new(FakeAdc::new(0, 0, 0, 4095), 350);

        assert_eq!(touch.pressure(), Ok(0));
        assert_eq!(touch.is_touched(), Ok(false));
    }

    #[test]
    fn pressure_above_threshold_is_a_contact() {
        let mut touch = Xpt2046::new(FakeAdc::new(1000, 2000, 400, 3000), 350);

        assert_eq!(touch.pressure(), Ok(400 + 1095));
        assert_eq!(touch.is_touched(), Ok(true));
    }

    #[test]
    fn raw_sample_reads_all_channels() {
        let mut touch = Xpt2046::new(FakeAdc::new(0x0ABC, 0x0123, 400, 3000), 350);

        assert_eq!(
            touch.read_raw(),
            Ok(RawSample {
                x: 0x0ABC,
                y: 0x0123,
                pressure: 1495,
            })
        );
        assert_eq!(
            touch.release().commands,
            vec![0xD0, 0xD0, 0x90, 0xB0, 0xC0]
        );
    }

    #[test]
    fn conversions_are_twelve_bits() {
        let mut touch = Xpt2046::new(FakeAdc::new(0x0FFF, 0, 0, 0), 350);

        assert_eq!(touch.read_raw().map(|s| s.x), Ok(0x0FFF));
    }
}
