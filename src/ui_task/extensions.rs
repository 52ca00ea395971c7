use defmt::{Format, Formatter};
use slint::platform::WindowEvent;

pub(super) struct PrintableWindowEvent<'a>(pub(super) &'a WindowEvent);
impl<'a> Format for PrintableWindowEvent<'a> {
    fn format(&self, fmt: Formatter) {
        match &self.0 {
            WindowEvent::PointerPressed {
                position,
                button: _,
            } => {
                defmt::write!(fmt, "PointerPressed x={}, y={}", position.x, position.y)
            }
            WindowEvent::PointerReleased {
                position,
                button: _,
            } => {
                defmt::write!(fmt, "PointerReleased x={}, y={}", position.x, position.y)
            }
            WindowEvent::PointerMoved { position } => {
                defmt::write!(fmt, "PointerMoved x={}, y={}", position.x, position.y)
            }
            WindowEvent::PointerExited => defmt::write!(fmt, "PointerExited"),
            _ => defmt::write!(fmt, "Non-pointer window event"),
        }
    }
}
