use eframe::egui;

use crate::tool::InkColor;

/// Round palette button for one ink
pub struct InkSwatch {
    pub color: InkColor,
    pub selected: bool,
}

impl InkSwatch {
    pub fn new(color: InkColor, selected: bool) -> Self {
        Self { color, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(24.0, 24.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let center = rect.center();
            let radius = rect.width() / 2.0 - 2.0;

            // Selection ring with a small gap around the swatch
            if self.selected {
                ui.painter().circle_stroke(
                    center,
                    radius + 2.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(120, 113, 108)),
                );
            } else if response.hovered() {
                ui.painter().circle_stroke(
                    center,
                    radius + 2.0,
                    egui::Stroke::new(1.0, egui::Color32::from_gray(190)),
                );
            }

            ui.painter().circle_filled(center, radius, self.color.to_color32());
            ui.painter().circle_stroke(
                center,
                radius,
                egui::Stroke::new(1.0, egui::Color32::from_rgb(214, 211, 209)),
            );

            // Slash marks the eraser
            if self.color.is_eraser() {
                let offset = egui::vec2(radius, -radius) * 0.5;
                ui.painter().line_segment(
                    [center - offset, center + offset],
                    egui::Stroke::new(1.5, egui::Color32::from_rgb(120, 113, 108)),
                );
            }
        }

        response.on_hover_text(self.color.label())
    }
}
