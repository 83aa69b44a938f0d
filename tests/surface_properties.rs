use egui::Pos2;
use inkflow::geometry::distance_to_line_segment;
use inkflow::tool::PAPER;
use inkflow::{DrawingSurface, GestureState, InkColor};

fn sheet(width: u32, height: u32) -> DrawingSurface {
    let mut surface = DrawingSurface::default();
    assert!(surface.initialize(width, height));
    surface
}

fn is_paper(surface: &DrawingSurface, x: u32, y: u32) -> bool {
    surface.pixel(x, y) == Some(PAPER)
}

fn all_paper(surface: &DrawingSurface) -> bool {
    surface.raster().unwrap().pixels().all(|p| *p == PAPER)
}

#[test]
fn test_operations_before_initialize_are_harmless() {
    let mut surface = DrawingSurface::default();

    surface.begin_gesture(Pos2::new(10.0, 10.0));
    surface.extend_gesture(Pos2::new(20.0, 20.0));
    surface.end_gesture();
    surface.clear();
    surface.set_stroke_width(12);
    surface.set_ink_color(InkColor::DarkRed);

    assert!(!surface.is_drawing());
    assert_eq!(surface.pixel(10, 10), None);
    assert!(surface.export_png().unwrap().is_empty());
    assert!(surface.to_color_image().is_none());
}

#[test]
fn test_fresh_sheet_is_paper() {
    let surface = sheet(64, 48);
    assert_eq!(surface.size(), Some([64, 48]));
    assert!(all_paper(&surface));
}

#[test]
fn test_segment_is_inked_within_its_radius() {
    let from = Pos2::new(20.0, 30.0);
    let to = Pos2::new(80.0, 30.0);

    for width in 1..=20 {
        for color in [InkColor::Black, InkColor::DarkBlue, InkColor::DarkRed] {
            let mut surface = sheet(100, 60);
            surface.set_stroke_width(width);
            surface.set_ink_color(color);
            surface.begin_gesture(from);
            surface.extend_gesture(to);

            // Pixels straddling the center line
            for x in 20..80 {
                for y in [29, 30] {
                    let pixel = surface.pixel(x, y).unwrap();
                    if width >= 2 {
                        assert_eq!(pixel, color.to_rgba(), "width {width} at ({x}, {y})");
                    } else {
                        assert_ne!(pixel, PAPER, "width {width} at ({x}, {y})");
                    }
                }
            }

            // Nothing is painted beyond the radius plus the anti-aliasing fringe
            let reach = width as f32 / 2.0 + 0.5;
            for y in 0..60 {
                for x in 0..100 {
                    if !is_paper(&surface, x, y) {
                        let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                        assert!(distance_to_line_segment(center, from, to) < reach);
                    }
                }
            }
        }
    }
}

#[test]
fn test_paper_ink_erases_by_overpaint() {
    let mut surface = sheet(80, 40);
    surface.set_stroke_width(4);
    surface.begin_gesture(Pos2::new(10.0, 20.0));
    surface.extend_gesture(Pos2::new(70.0, 20.0));
    surface.end_gesture();
    assert!(!all_paper(&surface));

    surface.set_ink_color(InkColor::Paper);
    surface.set_stroke_width(20);
    surface.begin_gesture(Pos2::new(10.0, 20.0));
    surface.extend_gesture(Pos2::new(70.0, 20.0));
    surface.end_gesture();
    assert!(all_paper(&surface));
}

#[test]
fn test_tap_leaves_a_dot() {
    for width in 1..=20 {
        for point in [Pos2::new(50.0, 50.0), Pos2::new(12.3, 40.8), Pos2::new(0.0, 0.0)] {
            let mut surface = sheet(100, 100);
            surface.set_stroke_width(width);
            surface.begin_gesture(point);

            let (x, y) = (point.x.floor() as u32, point.y.floor() as u32);
            assert!(!is_paper(&surface, x, y), "width {width} at {point:?}");
        }
    }
}

#[test]
fn test_dot_diameter_matches_width() {
    let mut surface = sheet(60, 60);
    surface.set_stroke_width(10);
    surface.begin_gesture(Pos2::new(30.0, 30.0));

    // Well inside the radius is solid, centers past 5.5 are untouched
    assert_eq!(surface.pixel(33, 30), Some(InkColor::Black.to_rgba()));
    assert_eq!(surface.pixel(26, 30), Some(InkColor::Black.to_rgba()));
    assert!(is_paper(&surface, 35, 30));
    assert!(is_paper(&surface, 24, 30));
}

#[test]
fn test_extend_while_idle_is_a_no_op() {
    let mut surface = sheet(50, 50);
    let before = surface.export_png().unwrap();
    let version = surface.version();

    surface.extend_gesture(Pos2::new(25.0, 25.0));
    assert_eq!(surface.version(), version);
    assert_eq!(surface.export_png().unwrap(), before);

    // Same after a finished gesture
    surface.begin_gesture(Pos2::new(5.0, 5.0));
    surface.end_gesture();
    let after_tap = surface.export_png().unwrap();
    surface.extend_gesture(Pos2::new(45.0, 45.0));
    assert_eq!(surface.export_png().unwrap(), after_tap);
    assert!(is_paper(&surface, 25, 25));
}

#[test]
fn test_clear_resets_every_pixel() {
    let mut surface = sheet(120, 90);
    for (i, color) in InkColor::ALL.iter().enumerate() {
        surface.set_ink_color(*color);
        surface.set_stroke_width(3 + i as u32 * 5);
        surface.begin_gesture(Pos2::new(5.0, 10.0 + i as f32 * 20.0));
        surface.extend_gesture(Pos2::new(115.0, 80.0 - i as f32 * 15.0));
        surface.extend_gesture(Pos2::new(60.0, 5.0));
        surface.end_gesture();
    }
    // Leave one gesture in flight
    surface.begin_gesture(Pos2::new(60.0, 45.0));
    assert!(!all_paper(&surface));

    surface.clear();
    assert!(all_paper(&surface));
}

#[test]
fn test_end_gesture_is_idempotent() {
    let mut surface = sheet(30, 30);
    surface.end_gesture();
    surface.end_gesture();
    assert_eq!(surface.gesture(), GestureState::Idle);

    surface.begin_gesture(Pos2::new(10.0, 10.0));
    surface.end_gesture();
    surface.end_gesture();
    surface.end_gesture();
    assert_eq!(surface.gesture(), GestureState::Idle);
}

#[test]
fn test_export_after_clear_matches_fresh_sheet() {
    let fresh = sheet(200, 150).export_png().unwrap();

    let mut surface = sheet(200, 150);
    surface.set_stroke_width(15);
    surface.begin_gesture(Pos2::new(10.0, 10.0));
    surface.extend_gesture(Pos2::new(190.0, 140.0));
    surface.end_gesture();
    assert_ne!(surface.export_png().unwrap(), fresh);

    surface.clear();
    assert_eq!(surface.export_png().unwrap(), fresh);
}

#[test]
fn test_export_does_not_mutate() {
    let mut surface = sheet(40, 40);
    surface.begin_gesture(Pos2::new(20.0, 20.0));
    let version = surface.version();

    let first = surface.export_png().unwrap();
    let second = surface.export_png().unwrap();
    assert_eq!(first, second);
    assert_eq!(surface.version(), version);
    assert!(surface.is_drawing());
}

#[test]
fn test_l_shaped_stroke_end_to_end() {
    let mut surface = sheet(500, 500);
    surface.set_stroke_width(10);
    surface.begin_gesture(Pos2::new(100.0, 100.0));
    surface.extend_gesture(Pos2::new(200.0, 100.0));
    surface.extend_gesture(Pos2::new(200.0, 200.0));
    surface.end_gesture();

    let png = surface.export_png().unwrap();
    let exported = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(exported.dimensions(), (500, 500));

    let ink = InkColor::Black.to_rgba();
    let at = |x: u32, y: u32| *exported.get_pixel(x, y);

    // Both legs are inked
    assert_eq!(at(150, 100), ink);
    assert_eq!(at(200, 150), ink);
    assert_eq!(at(200, 100), ink);

    // The horizontal leg is exactly ten pixels thick
    let inked_rows = (80..120).filter(|&y| at(150, y) == ink).count();
    assert_eq!(inked_rows, 10);
    assert_eq!(at(150, 94), PAPER);
    assert_eq!(at(150, 105), PAPER);

    // Round join: inside the radius around the corner is inked,
    // the square corner of a miter join is not
    assert_eq!(at(203, 97), ink);
    assert_eq!(at(204, 95), PAPER);

    // Background elsewhere
    assert_eq!(at(150, 150), PAPER);
    assert_eq!(at(400, 400), PAPER);
    assert_eq!(at(90, 100), PAPER);
}

#[test]
fn test_tool_state_is_read_live_mid_gesture() {
    let mut surface = sheet(200, 200);
    surface.set_stroke_width(2);
    surface.begin_gesture(Pos2::new(20.0, 50.0));
    surface.extend_gesture(Pos2::new(100.0, 50.0));

    surface.set_stroke_width(10);
    assert!(surface.is_drawing());
    surface.extend_gesture(Pos2::new(100.0, 150.0));
    surface.end_gesture();

    // First segment stays thin
    assert_eq!(surface.pixel(60, 50), Some(InkColor::Black.to_rgba()));
    assert!(is_paper(&surface, 60, 53));
    assert!(is_paper(&surface, 60, 46));

    // Second segment uses the new width
    assert_eq!(surface.pixel(104, 120), Some(InkColor::Black.to_rgba()));
    assert_eq!(surface.pixel(96, 120), Some(InkColor::Black.to_rgba()));
}

#[test]
fn test_ink_change_mid_gesture_applies_to_later_segments() {
    let mut surface = sheet(100, 100);
    surface.set_stroke_width(4);
    surface.begin_gesture(Pos2::new(10.0, 10.0));
    surface.extend_gesture(Pos2::new(50.0, 10.0));
    surface.set_ink_color(InkColor::DarkRed);
    surface.extend_gesture(Pos2::new(50.0, 90.0));
    surface.end_gesture();

    assert_eq!(surface.pixel(30, 10), Some(InkColor::Black.to_rgba()));
    assert_eq!(surface.pixel(50, 60), Some(InkColor::DarkRed.to_rgba()));
}

#[test]
fn test_later_strokes_paint_over_earlier_ones() {
    let mut surface = sheet(100, 100);
    surface.set_stroke_width(6);
    surface.begin_gesture(Pos2::new(10.0, 50.0));
    surface.extend_gesture(Pos2::new(90.0, 50.0));
    surface.end_gesture();

    surface.set_ink_color(InkColor::DarkBlue);
    surface.begin_gesture(Pos2::new(50.0, 10.0));
    surface.extend_gesture(Pos2::new(50.0, 90.0));
    surface.end_gesture();

    assert_eq!(surface.pixel(50, 50), Some(InkColor::DarkBlue.to_rgba()));
    assert_eq!(surface.pixel(20, 50), Some(InkColor::Black.to_rgba()));
}

#[test]
fn test_stroke_width_is_clamped() {
    let mut surface = sheet(10, 10);
    surface.set_stroke_width(0);
    assert_eq!(surface.stroke_width().get(), 1);
    surface.set_stroke_width(99);
    assert_eq!(surface.stroke_width().get(), 20);
}
