//! This module is responsible for turning pointer events into UI framework events

use embedded_graphics::geometry::Point;
use slint::platform::{PointerEventButton, WindowEvent};

use super::{PointerEvent, PointerState};

/// Tracks what the window has been told so far, so that a contact shows up
/// as press, moves and one release.
#[derive(Default)]
pub struct WindowEventBridge {
    touch_notified_to_ui: bool,
    last_position: Option<Point>,
}

impl WindowEventBridge {
    pub const fn new() -> Self {
        Self {
            touch_notified_to_ui: false,
            last_position: None,
        }
    }

    /// Translates one pointer event into the window events to dispatch,
    /// in order.
    pub fn translate(
        &mut self,
        event: PointerEvent,
        scale_factor: f32,
    ) -> impl Iterator<Item = WindowEvent> {
        let position = slint::PhysicalPosition::new(event.position.x, event.position.y)
            .to_logical(scale_factor);
        let button = PointerEventButton::Left;

        let events = match event.state {
            PointerState::Pressed if !self.touch_notified_to_ui => {
                self.touch_notified_to_ui = true;
                [Some(WindowEvent::PointerPressed { position, button }), None]
            }
            // Analyze touch input only in case of a change
            PointerState::Pressed if self.last_position != Some(event.position) => {
                [Some(WindowEvent::PointerMoved { position }), None]
            }
            PointerState::Pressed => [None, None],
            PointerState::Released if self.touch_notified_to_ui => {
                self.touch_notified_to_ui = false;
                // Exiting removes the hover state of the widget under the finger
                [
                    Some(WindowEvent::PointerReleased { position, button }),
                    Some(WindowEvent::PointerExited),
                ]
            }
            PointerState::Released => [None, None],
        };

        self.last_position = match event.state {
            PointerState::Pressed => Some(event.position),
            PointerState::Released => None,
        };
        events.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: i32, y: i32, state: PointerState) -> PointerEvent {
        PointerEvent {
            position: Point::new(x, y),
            state,
        }
    }

    fn translate(bridge: &mut WindowEventBridge, event: PointerEvent) -> Vec<WindowEvent> {
        bridge.translate(event, 1.0).collect()
    }

    #[test]
    fn contact_becomes_press_moves_and_release() {
        let mut bridge = WindowEventBridge::new();

        let events = translate(&mut bridge, at(10, 20, PointerState::Pressed));
        assert!(matches!(
            events.as_slice(),
            [WindowEvent::PointerPressed { position, button: PointerEventButton::Left }]
                if position.x == 10.0 && position.y == 20.0
        ));

        let events = translate(&mut bridge, at(11, 20, PointerState::Pressed));
        assert!(matches!(
            events.as_slice(),
            [WindowEvent::PointerMoved { position }] if position.x == 11.0
        ));

        let events = translate(&mut bridge, at(11, 20, PointerState::Released));
        assert!(matches!(
            events.as_slice(),
            [
                WindowEvent::PointerReleased { position, .. },
                WindowEvent::PointerExited
            ] if position.x == 11.0 && position.y == 20.0
        ));
    }

    #[test]
    fn unchanged_position_is_not_reported_again() {
        let mut bridge = WindowEventBridge::new();

        assert_eq!(translate(&mut bridge, at(5, 5, PointerState::Pressed)).len(), 1);
        assert!(translate(&mut bridge, at(5, 5, PointerState::Pressed)).is_empty());
    }

    #[test]
    fn release_without_press_is_dropped() {
        let mut bridge = WindowEventBridge::new();

        assert!(translate(&mut bridge, at(5, 5, PointerState::Released)).is_empty());
    }

    #[test]
    fn positions_are_scaled_to_logical_pixels() {
        let mut bridge = WindowEventBridge::new();

        let events: Vec<_> = bridge
            .translate(at(100, 50, PointerState::Pressed), 2.0)
            .collect();
        assert!(matches!(
            events.as_slice(),
            [WindowEvent::PointerPressed { position, .. }]
                if position.x == 50.0 && position.y == 25.0
        ));
    }

    #[test]
    fn adapter_events_drive_the_window() {
        use crate::touch::{tests::{calibration, ScriptedSensor}, PointerAdapter, PointerSource};

        let mut adapter = PointerAdapter::new(
            ScriptedSensor::new([None, Some((300, 300)), Some((300, 300)), None, None]),
            calibration(),
        );
        let mut bridge = WindowEventBridge::new();

        let dispatched: Vec<WindowEvent> = (0..5)
            .filter_map(|_| adapter.poll())
            .flat_map(|event| bridge.translate(event, 1.0).collect::<Vec<_>>())
            .collect();

        assert!(matches!(
            dispatched.as_slice(),
            [
                WindowEvent::PointerPressed { .. },
                WindowEvent::PointerReleased { .. },
                WindowEvent::PointerExited
            ]
        ));
    }
}
