use eframe::egui::{self, Color32, Rect, RichText};
use log::{error, info};
use std::path::PathBuf;

use crate::components::InkSwatch;
use crate::config::AppConfig;
use crate::error::ExportError;
use crate::input::{GestureRouter, HeldContacts, SurfaceArea};
use crate::surface::DrawingSurface;
use crate::tool::{InkColor, StrokeWidth};

/// Spacing of the ruled guidelines drawn over the sheet
const GUIDELINE_SPACING: f32 = 40.0;
const GUIDELINE_OFFSET: f32 = 20.0;

/// The practice desk: toolbar plus the drawing surface
pub struct PracticePanel {
    surface: DrawingSurface,
    router: GestureRouter,
    texture: Option<egui::TextureHandle>,
    texture_version: u64,
    canvas_height: f32,
    export_path: PathBuf,
    notice: Option<String>,
}

impl PracticePanel {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            surface: DrawingSurface::new(config.default_stroke_width, config.default_ink),
            router: GestureRouter::new(),
            texture: None,
            texture_version: 0,
            canvas_height: config.canvas_height,
            export_path: config.export_path(),
            notice: None,
        }
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    /// End any gesture in progress, e.g. when the view is switched away
    pub fn cancel_gesture(&mut self) {
        self.router.cancel(&mut self.surface);
    }

    /// Write the sheet as PNG to the configured export path
    pub fn save(&self) -> Result<PathBuf, ExportError> {
        let bytes = self.surface.export_png()?;
        std::fs::write(&self.export_path, bytes)?;
        Ok(self.export_path.clone())
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Practice Desk");
            ui.label(RichText::new("Freehand practice on digital parchment").italics());
        });
        ui.add_space(8.0);

        self.toolbar(ui);
        ui.separator();
        self.canvas(ui);

        if let Some(notice) = &self.notice {
            ui.label(RichText::new(notice).color(Color32::from_rgb(120, 113, 108)));
        }
        ui.vertical_centered(|ui| {
            ui.small("Tip: Use a stylus for better control on touch devices.");
        });
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("NIB WIDTH").small().strong());
            let mut width = self.surface.stroke_width().get();
            if ui
                .add(egui::Slider::new(&mut width, StrokeWidth::MIN..=StrokeWidth::MAX))
                .changed()
            {
                self.surface.set_stroke_width(width);
            }

            ui.add_space(12.0);
            ui.label(RichText::new("INK").small().strong());
            for color in InkColor::ALL {
                let selected = self.surface.ink_color() == color;
                if InkSwatch::new(color, selected).show(ui).clicked() {
                    self.surface.set_ink_color(color);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Save").on_hover_text("Save").clicked() {
                    self.notice = Some(match self.save() {
                        Ok(path) => {
                            info!("Saved practice sheet to {}", path.display());
                            format!("Saved to {}", path.display())
                        }
                        Err(err) => {
                            error!("Saving practice sheet failed: {}", err);
                            "Could not save the practice sheet. Please try again.".to_owned()
                        }
                    });
                }
                if ui.button("Clear").on_hover_text("Clear").clicked() {
                    self.surface.clear();
                    self.notice = None;
                }
            });
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(ui.available_width(), self.canvas_height);
        let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::drag());

        // The buffer keeps this size for the rest of the session
        if !self.surface.is_initialized() {
            self.surface
                .initialize(rect.width().round() as u32, rect.height().round() as u32);
        }

        let (mut events, held) = ui.input(|i| (i.events.clone(), HeldContacts::from_input(i)));
        events.retain(|event| !pressed_under_other_layer(ui, event));
        let area = SurfaceArea::new(rect, ui.clip_rect());
        self.router.process_events(&events, area, held, &mut self.surface);
        self.refresh_texture(ui.ctx());

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, InkColor::Paper.to_color32());
        if let (Some(texture), Some([width, height])) = (&self.texture, self.surface.size()) {
            let image_rect = Rect::from_min_size(rect.min, egui::vec2(width as f32, height as f32));
            let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), image_rect, uv, Color32::WHITE);
        }

        // Guidelines are display-only and never reach the raster
        let guideline = egui::Stroke::new(1.0, Color32::from_black_alpha(25));
        let mut y = rect.top() + GUIDELINE_OFFSET;
        while y < rect.bottom() {
            painter.hline(rect.x_range(), y, guideline);
            y += GUIDELINE_SPACING;
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() && self.texture_version == self.surface.version() {
            return;
        }
        let Some(image) = self.surface.to_color_image() else {
            return;
        };

        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("practice_sheet", image, egui::TextureOptions::NEAREST));
            }
        }
        self.texture_version = self.surface.version();
    }
}

/// Presses that land on a popup or window above the sheet belong to it
fn pressed_under_other_layer(ui: &egui::Ui, event: &egui::Event) -> bool {
    let pos = match event {
        egui::Event::PointerButton { pos, pressed: true, .. } => *pos,
        egui::Event::Touch {
            pos,
            phase: egui::TouchPhase::Start,
            ..
        } => *pos,
        _ => return false,
    };
    ui.ctx().layer_id_at(pos).is_some_and(|layer| layer != ui.layer_id())
}
