use egui::{Pos2, Rect};

/// Distance from a point to the closest point of a line segment.
///
/// A zero-length segment degenerates to a point, which is how a single
/// dot is rasterized.
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Bounding box of a segment grown by `padding` on every side.
pub fn segment_bounds(line_start: Pos2, line_end: Pos2, padding: f32) -> Rect {
    Rect::from_two_pos(line_start, line_end).expand(padding)
}
