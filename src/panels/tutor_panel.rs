use eframe::egui::{self, RichText};
use log::{error, info};
use std::path::Path;
use std::sync::Arc;

use crate::error::PhotoError;
use crate::file_handler::{self, PracticePhoto};
use crate::service::{self, CalligraphyService, ServiceResult};
use crate::task::Request;

const ANALYSIS_FAILED: &str = "Analysis failed. Please check your API key and internet connection.";

/// Critique of a photographed practice sheet
pub struct TutorPanel {
    service: Arc<dyn CalligraphyService>,
    photo: Option<PracticePhoto>,
    photo_texture: Option<egui::TextureHandle>,
    path_input: String,
    style_goal: String,
    critique_request: Request<ServiceResult<String>>,
    critique: Option<String>,
    notice: Option<String>,
}

impl TutorPanel {
    pub fn new(service: Arc<dyn CalligraphyService>) -> Self {
        Self {
            service,
            photo: None,
            photo_texture: None,
            path_input: String::new(),
            style_goal: String::new(),
            critique_request: Request::new(),
            critique: None,
            notice: None,
        }
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    /// Replace the current photo; any previous critique no longer applies
    pub fn accept_photo(&mut self, ctx: &egui::Context, result: Result<PracticePhoto, PhotoError>) {
        match result {
            Ok(photo) => {
                info!("Practice photo loaded: {}", photo.name);
                self.photo_texture =
                    Some(ctx.load_texture("practice_photo", photo.preview.clone(), egui::TextureOptions::LINEAR));
                self.photo = Some(photo);
                self.critique = None;
                self.notice = None;
            }
            Err(err) => {
                error!("Could not load practice photo: {}", err);
                self.notice = Some("That file could not be opened as an image.".to_owned());
            }
        }
    }

    pub fn remove_photo(&mut self) {
        self.photo = None;
        self.photo_texture = None;
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        if let Some(result) = file_handler::take_dropped_photo(&ctx) {
            self.accept_photo(&ctx, result);
        }
        if let Some(result) = self.critique_request.poll() {
            match result {
                Ok(text) => self.critique = Some(text),
                Err(_) => self.notice = Some(ANALYSIS_FAILED.to_owned()),
            }
        }

        ui.vertical_centered(|ui| {
            ui.heading("The Tutor");
            ui.label(RichText::new("Submit a photo of your practice for critique").italics());
        });
        ui.add_space(8.0);

        ui.columns(2, |columns| {
            self.upload(&ctx, &mut columns[0]);
            self.result(&mut columns[1]);
        });
    }

    fn upload(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.group(|ui| {
            if let Some(texture) = &self.photo_texture {
                let size = texture.size_vec2();
                let scale = (ui.available_width() / size.x).min(1.0);
                ui.image((texture.id(), size * scale));
                if ui.button("Remove Image").clicked() {
                    self.remove_photo();
                }
            } else {
                ui.label("Drop a photo of your practice sheet here, or open one by path.");
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(&mut self.path_input).hint_text("/path/to/photo.jpg"));
                    if ui.button("Select File").clicked() && !self.path_input.trim().is_empty() {
                        let result = PracticePhoto::from_path(Path::new(self.path_input.trim()));
                        self.accept_photo(ctx, result);
                    }
                });
            }
        });
        ui.add_space(8.0);

        ui.label(RichText::new("WHAT STYLE ARE YOU PRACTICING?").small().strong());
        ui.add(
            egui::TextEdit::singleline(&mut self.style_goal)
                .hint_text("e.g. Copperplate, Gothic, Modern Brush..."),
        );
        ui.add_space(8.0);

        let loading = self.critique_request.is_loading();
        let label = if loading { "Analyzing strokes..." } else { "Request Critique" };
        let enabled = self.photo.is_some() && !loading;
        if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
            if let Some(photo) = &self.photo {
                self.notice = None;
                self.critique_request.spawn(
                    ctx,
                    service::critique(self.service.as_ref(), photo.encoded.clone(), &self.style_goal),
                );
            }
        }

        if let Some(notice) = &self.notice {
            ui.colored_label(egui::Color32::from_rgb(127, 29, 29), notice.as_str());
        }
    }

    fn result(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Master's Feedback").strong());
        ui.separator();
        if self.critique_request.is_loading() {
            ui.spinner();
        } else if let Some(critique) = &self.critique {
            ui.label(critique.as_str());
        } else {
            ui.label(RichText::new("Your critique will appear here.").italics());
        }
    }
}
