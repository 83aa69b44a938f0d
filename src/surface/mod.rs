use egui::{ColorImage, Pos2};
use image::Rgba;
use log::{debug, info, warn};

use crate::error::ExportError;
use crate::tool::{InkColor, StrokeWidth, PAPER};

mod raster;
pub use raster::Raster;

/// Whether a pointer gesture is in progress on the surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pointer is down; `last` is the most recently rasterized point
    Drawing { last: Pos2 },
}

/// The practice sheet: a paper-colored raster that pointer gestures ink
/// into immediately and irreversibly.
///
/// The raster is allocated once by [`DrawingSurface::initialize`], when the
/// on-screen size of the sheet is first known. Until then every operation
/// is a no-op and exports are empty.
///
/// Tool state is read live: changing the width or ink mid-gesture affects
/// every segment drawn after the change, not the ones already on the sheet.
pub struct DrawingSurface {
    raster: Option<Raster>,
    gesture: GestureState,
    stroke_width: StrokeWidth,
    ink: InkColor,
    /// Bumped on every change to the raster
    version: u64,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(StrokeWidth::default(), InkColor::default())
    }
}

impl DrawingSurface {
    /// Create an uninitialized surface with the given tool state
    pub fn new(stroke_width: StrokeWidth, ink: InkColor) -> Self {
        Self {
            raster: None,
            gesture: GestureState::Idle,
            stroke_width,
            ink,
            version: 0,
        }
    }

    /// Allocate the raster and fill it with paper.
    ///
    /// Only the first successful call has an effect; re-running it would wipe
    /// the sheet. Zero-sized dimensions are rejected. Returns whether the
    /// raster was allocated by this call.
    pub fn initialize(&mut self, width: u32, height: u32) -> bool {
        if self.raster.is_some() {
            warn!("Practice surface already initialized, ignoring {}x{}", width, height);
            return false;
        }
        if width == 0 || height == 0 {
            warn!("Refusing to initialize practice surface at {}x{}", width, height);
            return false;
        }

        info!("Initializing practice surface at {}x{}", width, height);
        self.raster = Some(Raster::new(width, height, PAPER));
        self.version += 1;
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.raster.is_some()
    }

    /// Buffer dimensions, once initialized
    pub fn size(&self) -> Option<[u32; 2]> {
        self.raster.as_ref().map(|r| [r.width(), r.height()])
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.gesture, GestureState::Drawing { .. })
    }

    pub fn stroke_width(&self) -> StrokeWidth {
        self.stroke_width
    }

    /// Clamped into `1..=20`; applies to marks made from now on
    pub fn set_stroke_width(&mut self, width: u32) {
        self.stroke_width = StrokeWidth::new(width);
    }

    pub fn ink_color(&self) -> InkColor {
        self.ink
    }

    pub fn set_ink_color(&mut self, color: InkColor) {
        self.ink = color;
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Start a gesture at `point` and ink a dot there, so a tap leaves a mark.
    ///
    /// Restarts the gesture if one is already in progress.
    pub fn begin_gesture(&mut self, point: Pos2) {
        if !point.x.is_finite() || !point.y.is_finite() {
            return;
        }
        let radius = self.stroke_width.radius();
        let color = self.ink.to_rgba();
        let Some(raster) = self.raster.as_mut() else {
            debug!("Gesture started before the surface was initialized");
            return;
        };

        if raster.stamp_segment(point, point, radius, color) {
            self.version += 1;
        }
        self.gesture = GestureState::Drawing { last: point };
        debug!("Gesture started at {:?}", point);
    }

    /// Ink a round-capped segment from the last point to `point`.
    ///
    /// Does nothing while idle.
    pub fn extend_gesture(&mut self, point: Pos2) {
        let GestureState::Drawing { last } = self.gesture else {
            return;
        };
        if !point.x.is_finite() || !point.y.is_finite() {
            return;
        }
        let radius = self.stroke_width.radius();
        let color = self.ink.to_rgba();
        let Some(raster) = self.raster.as_mut() else {
            return;
        };

        if raster.stamp_segment(last, point, radius, color) {
            self.version += 1;
        }
        self.gesture = GestureState::Drawing { last: point };
    }

    /// Finish the current gesture. Safe to call while idle.
    pub fn end_gesture(&mut self) {
        if self.is_drawing() {
            debug!("Gesture ended");
        }
        self.gesture = GestureState::Idle;
    }

    /// Repaint the whole sheet with paper. There is no undo.
    pub fn clear(&mut self) {
        if let Some(raster) = self.raster.as_mut() {
            info!("Clearing practice surface");
            raster.fill(PAPER);
            self.version += 1;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.raster.as_ref().and_then(|r| r.pixel(x, y))
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    /// Encode the sheet as PNG exactly as it is now.
    ///
    /// Returns an empty buffer if the surface was never initialized.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        match &self.raster {
            Some(raster) => raster.encode_png(),
            None => Ok(Vec::new()),
        }
    }

    pub fn to_color_image(&self) -> Option<ColorImage> {
        self.raster.as_ref().map(Raster::to_color_image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(width: u32, height: u32) -> DrawingSurface {
        let mut surface = DrawingSurface::default();
        assert!(surface.initialize(width, height));
        surface
    }

    #[test]
    fn test_initialize_only_once() {
        let mut surface = surface(20, 10);
        surface.begin_gesture(Pos2::new(5.0, 5.0));
        surface.end_gesture();

        assert!(!surface.initialize(40, 40));
        assert_eq!(surface.size(), Some([20, 10]));
        assert_ne!(surface.pixel(5, 5), Some(PAPER));
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let mut surface = DrawingSurface::default();
        assert!(!surface.initialize(0, 30));
        assert!(!surface.is_initialized());
        assert!(surface.initialize(30, 30));
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut surface = surface(50, 50);
        assert_eq!(surface.gesture(), GestureState::Idle);

        surface.begin_gesture(Pos2::new(10.0, 10.0));
        assert_eq!(surface.gesture(), GestureState::Drawing { last: Pos2::new(10.0, 10.0) });

        surface.extend_gesture(Pos2::new(20.0, 10.0));
        assert_eq!(surface.gesture(), GestureState::Drawing { last: Pos2::new(20.0, 10.0) });

        surface.end_gesture();
        assert_eq!(surface.gesture(), GestureState::Idle);
    }

    #[test]
    fn test_non_finite_points_are_ignored() {
        let mut surface = surface(30, 30);
        let version = surface.version();

        surface.begin_gesture(Pos2::new(f32::NAN, 4.0));
        assert!(!surface.is_drawing());

        surface.begin_gesture(Pos2::new(4.0, 4.0));
        let version_after_dot = surface.version();
        assert!(version_after_dot > version);

        surface.extend_gesture(Pos2::new(f32::INFINITY, 4.0));
        assert_eq!(surface.version(), version_after_dot);
        assert_eq!(surface.gesture(), GestureState::Drawing { last: Pos2::new(4.0, 4.0) });
    }

    #[test]
    fn test_version_tracks_mutations() {
        let mut surface = DrawingSurface::default();
        assert_eq!(surface.version(), 0);
        surface.clear();
        assert_eq!(surface.version(), 0);

        surface.initialize(10, 10);
        let initialized = surface.version();
        surface.extend_gesture(Pos2::new(1.0, 1.0));
        assert_eq!(surface.version(), initialized);
        surface.clear();
        assert!(surface.version() > initialized);
    }
}
