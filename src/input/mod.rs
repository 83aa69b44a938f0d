use egui::{Event, Pos2, PointerButton, TouchPhase};

mod router;
pub use router::{GestureRouter, HeldContacts, SurfaceArea};

/// The device contact an input event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSource {
    /// Primary mouse button or pen
    Mouse,
    /// A single finger, identified by its touch id
    Touch(u64),
}

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    pub source: ContactSource,
}

/// Platform-neutral pointer events understood by the practice surface
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A contact was pressed
    PointerDown { location: InputLocation },
    /// A contact moved, pressed or not
    PointerMove { location: InputLocation },
    /// A contact was released
    PointerUp { source: ContactSource },
    /// A contact left the window or was cancelled
    PointerLeave { source: ContactSource },
}

impl InputEvent {
    /// Translate a raw egui event.
    ///
    /// Only primary-button mouse events and touch events are relevant;
    /// everything else yields `None`.
    pub fn from_egui(event: &Event) -> Option<Self> {
        match event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => {
                if *pressed {
                    Some(Self::PointerDown {
                        location: InputLocation {
                            position: *pos,
                            source: ContactSource::Mouse,
                        },
                    })
                } else {
                    Some(Self::PointerUp {
                        source: ContactSource::Mouse,
                    })
                }
            }
            Event::PointerMoved(pos) => Some(Self::PointerMove {
                location: InputLocation {
                    position: *pos,
                    source: ContactSource::Mouse,
                },
            }),
            Event::PointerGone => Some(Self::PointerLeave {
                source: ContactSource::Mouse,
            }),
            Event::Touch { id, phase, pos, .. } => {
                let source = ContactSource::Touch(id.0);
                let location = InputLocation {
                    position: *pos,
                    source,
                };
                Some(match phase {
                    TouchPhase::Start => Self::PointerDown { location },
                    TouchPhase::Move => Self::PointerMove { location },
                    TouchPhase::End => Self::PointerUp { source },
                    TouchPhase::Cancel => Self::PointerLeave { source },
                })
            }
            _ => None,
        }
    }

    pub fn source(&self) -> ContactSource {
        match self {
            Self::PointerDown { location } | Self::PointerMove { location } => location.source,
            Self::PointerUp { source } | Self::PointerLeave { source } => *source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, TouchDeviceId, TouchId};

    #[test]
    fn test_primary_button_translates() {
        let down = Event::PointerButton {
            pos: Pos2::new(3.0, 4.0),
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::default(),
        };
        assert_eq!(
            InputEvent::from_egui(&down),
            Some(InputEvent::PointerDown {
                location: InputLocation {
                    position: Pos2::new(3.0, 4.0),
                    source: ContactSource::Mouse,
                },
            })
        );

        let up = Event::PointerButton {
            pos: Pos2::new(3.0, 4.0),
            button: PointerButton::Primary,
            pressed: false,
            modifiers: Modifiers::default(),
        };
        assert_eq!(
            InputEvent::from_egui(&up),
            Some(InputEvent::PointerUp { source: ContactSource::Mouse })
        );
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let event = Event::PointerButton {
            pos: Pos2::ZERO,
            button: PointerButton::Secondary,
            pressed: true,
            modifiers: Modifiers::default(),
        };
        assert_eq!(InputEvent::from_egui(&event), None);
    }

    #[test]
    fn test_touch_phases_translate() {
        let touch = |phase| Event::Touch {
            device_id: TouchDeviceId(1),
            id: TouchId(7),
            phase,
            pos: Pos2::new(1.0, 2.0),
            force: None,
        };

        assert!(matches!(
            InputEvent::from_egui(&touch(TouchPhase::Start)),
            Some(InputEvent::PointerDown { .. })
        ));
        assert!(matches!(
            InputEvent::from_egui(&touch(TouchPhase::Move)),
            Some(InputEvent::PointerMove { .. })
        ));
        assert_eq!(
            InputEvent::from_egui(&touch(TouchPhase::End)),
            Some(InputEvent::PointerUp { source: ContactSource::Touch(7) })
        );
        assert_eq!(
            InputEvent::from_egui(&touch(TouchPhase::Cancel)),
            Some(InputEvent::PointerLeave { source: ContactSource::Touch(7) })
        );
    }
}
