use egui::{Event, Pos2, Rect};
use log::debug;

use super::{ContactSource, InputEvent};
use crate::surface::DrawingSurface;

/// Where the surface sits on screen during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceArea {
    /// Full rect of the buffer; its top-left corner is the buffer origin
    pub rect: Rect,
    /// The part of `rect` the user can actually see and press
    pub visible: Rect,
}

impl SurfaceArea {
    /// `rect` as laid out, clipped by whatever scrolls or panels cover it
    pub fn new(rect: Rect, clip: Rect) -> Self {
        Self {
            rect,
            visible: rect.intersect(clip),
        }
    }

    /// A surface with nothing covering it
    pub fn unclipped(rect: Rect) -> Self {
        Self { rect, visible: rect }
    }

    pub fn contains(&self, position: Pos2) -> bool {
        self.visible.is_positive() && self.visible.contains(position)
    }

    /// Screen position to buffer-local position
    pub fn to_local(&self, position: Pos2) -> Pos2 {
        (position - self.rect.min).to_pos2()
    }
}

/// Which contacts the platform reports as still held at the end of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldContacts {
    pub primary: bool,
    pub touch: bool,
}

impl HeldContacts {
    pub fn from_input(input: &egui::InputState) -> Self {
        Self {
            primary: input.pointer.primary_down(),
            touch: input.any_touches(),
        }
    }

    pub fn holds(&self, source: ContactSource) -> bool {
        match source {
            ContactSource::Mouse => self.primary,
            ContactSource::Touch(_) => self.touch,
        }
    }
}

/// Routes pointer events to the surface's gesture operations.
///
/// Only one contact draws at a time: the first press inside the surface
/// claims it, and presses from any other mouse or finger are ignored until
/// it is released. Leaving the surface ends the gesture; re-entering needs
/// a new press.
///
/// The router only sees events on frames where the surface is shown, so a
/// release can be missed. [`HeldContacts`] catches that case.
#[derive(Debug, Default)]
pub struct GestureRouter {
    active: Option<ContactSource>,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The contact currently drawing, if any
    pub fn active_contact(&self) -> Option<ContactSource> {
        self.active
    }

    /// Route every relevant egui event of this frame.
    ///
    /// `held` is the pointer state after this frame's events. If the active
    /// contact is no longer held and none of the events releases it, its
    /// release happened while nobody was listening and the gesture ends
    /// before anything else is routed.
    pub fn process_events(
        &mut self,
        events: &[Event],
        area: SurfaceArea,
        held: HeldContacts,
        surface: &mut DrawingSurface,
    ) {
        let events: Vec<InputEvent> = events.iter().filter_map(InputEvent::from_egui).collect();

        if let Some(active) = self.active {
            let released_here = events.iter().any(|event| {
                matches!(event, InputEvent::PointerUp { .. } | InputEvent::PointerLeave { .. })
                    && event.source() == active
            });
            if !held.holds(active) && !released_here {
                debug!("Release of {:?} was missed, ending gesture", active);
                self.cancel(surface);
            }
        }

        for event in &events {
            self.route_event(event, area, surface);
        }
    }

    /// Route a single event.
    ///
    /// `area` is the surface's current placement; it is passed per event
    /// because the surface can move between events (scrolling).
    pub fn route_event(&mut self, event: &InputEvent, area: SurfaceArea, surface: &mut DrawingSurface) {
        match event {
            InputEvent::PointerDown { location } => {
                if self.active.is_some_and(|active| active != location.source) {
                    debug!("Ignoring press from {:?}, another contact is drawing", location.source);
                    return;
                }
                if !area.contains(location.position) {
                    // A second press from the drawing contact means its release was lost
                    if self.active.is_some() {
                        self.cancel(surface);
                    }
                    return;
                }
                self.active = Some(location.source);
                surface.begin_gesture(area.to_local(location.position));
            }
            InputEvent::PointerMove { location } => {
                if self.active != Some(location.source) {
                    return;
                }
                if area.contains(location.position) {
                    surface.extend_gesture(area.to_local(location.position));
                } else {
                    debug!("Contact left the surface");
                    self.cancel(surface);
                }
            }
            InputEvent::PointerUp { source } | InputEvent::PointerLeave { source } => {
                if self.active == Some(*source) {
                    self.cancel(surface);
                }
            }
        }
    }

    /// End whatever gesture is in progress and forget the active contact
    pub fn cancel(&mut self, surface: &mut DrawingSurface) {
        self.active = None;
        surface.end_gesture();
    }
}
