use eframe::egui::{self, RichText};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::service::{self, CalligraphyService, EncodedImage, ServiceResult};
use crate::style::{self, CalligraphyStyle, CALLIGRAPHY_STYLES};
use crate::task::Request;

const GENERATION_FAILED: &str = "Failed to generate image. Please try again.";

/// Exemplar generator with the history of the selected style
pub struct StudyPanel {
    service: Arc<dyn CalligraphyService>,
    text: String,
    style: &'static CalligraphyStyle,
    /// Style the current history text belongs to
    history_style: Option<&'static str>,
    history: Request<String>,
    history_text: String,
    exemplar_request: Request<ServiceResult<EncodedImage>>,
    exemplar: Option<EncodedImage>,
    exemplar_texture: Option<egui::TextureHandle>,
    export_dir: PathBuf,
    notice: Option<String>,
}

impl StudyPanel {
    pub fn new(service: Arc<dyn CalligraphyService>, style_id: &str, export_dir: &Path) -> Self {
        Self {
            service,
            text: "InkFlow".to_owned(),
            style: style::find_style(style_id).unwrap_or_else(style::default_style),
            history_style: None,
            history: Request::new(),
            history_text: String::new(),
            exemplar_request: Request::new(),
            exemplar: None,
            exemplar_texture: None,
            export_dir: export_dir.to_path_buf(),
            notice: None,
        }
    }

    pub fn selected_style(&self) -> &'static CalligraphyStyle {
        self.style
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        self.poll(&ctx);

        ui.vertical_centered(|ui| {
            ui.heading("Study the Masters");
            ui.label(RichText::new("Generate exemplars of historical hands").italics());
        });
        ui.add_space(8.0);

        ui.columns(2, |columns| {
            self.controls(&ctx, &mut columns[0]);
            self.preview(&mut columns[1]);
        });
    }

    fn poll(&mut self, ctx: &egui::Context) {
        // History follows the selected style
        if self.history_style != Some(self.style.id) {
            self.history_style = Some(self.style.id);
            self.history_text.clear();
            self.history
                .spawn(ctx, service::style_history(self.service.as_ref(), self.style.name));
        }
        if let Some(text) = self.history.poll() {
            self.history_text = text;
        }

        if let Some(result) = self.exemplar_request.poll() {
            match result.and_then(|image| decode_preview(&image).map(|preview| (image, preview))) {
                Ok((image, preview)) => {
                    info!("Exemplar ready ({}, {} bytes)", image.mime_type, image.data.len());
                    self.exemplar_texture = Some(ctx.load_texture("exemplar", preview, egui::TextureOptions::LINEAR));
                    self.exemplar = Some(image);
                }
                Err(_) => self.notice = Some(GENERATION_FAILED.to_owned()),
            }
        }
    }

    fn controls(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.label(RichText::new("TEXT").small().strong());
        ui.add(egui::TextEdit::singleline(&mut self.text).hint_text("Enter text..."));
        ui.add_space(8.0);

        ui.label(RichText::new("STYLE").small().strong());
        for candidate in &CALLIGRAPHY_STYLES {
            let selected = self.style.id == candidate.id;
            let label = format!("{}  ·  {}", candidate.name, candidate.era);
            if ui
                .selectable_label(selected, label)
                .on_hover_text(candidate.description)
                .clicked()
            {
                self.style = candidate;
            }
        }
        ui.add_space(8.0);

        ui.group(|ui| {
            ui.label(RichText::new(format!("About {}", self.style.name)).strong());
            if self.history.is_loading() {
                ui.spinner();
            } else {
                ui.label(self.history_text.as_str());
            }
        });
        ui.add_space(8.0);

        let loading = self.exemplar_request.is_loading();
        let label = if loading { "Inking..." } else { "Generate Exemplar" };
        if ui.add_enabled(!loading, egui::Button::new(label)).clicked() && !self.text.trim().is_empty() {
            self.notice = None;
            self.exemplar_request.spawn(
                ctx,
                service::generate_exemplar(self.service.as_ref(), &self.text, self.style.name),
            );
        }

        if let Some(notice) = &self.notice {
            ui.colored_label(egui::Color32::from_rgb(127, 29, 29), notice.as_str());
        }
    }

    fn preview(&mut self, ui: &mut egui::Ui) {
        let Some(texture) = &self.exemplar_texture else {
            ui.centered_and_justified(|ui| {
                ui.label("Select a style and generate to see the result");
            });
            return;
        };

        let size = texture.size_vec2();
        let scale = (ui.available_width() / size.x).min(1.0);
        ui.image((texture.id(), size * scale));

        if ui.button("Download Reference").clicked() {
            if let Some(image) = &self.exemplar {
                let path = self.export_dir.join(reference_file_name(self.style, &image.mime_type));
                match std::fs::write(&path, &image.data) {
                    Ok(()) => info!("Saved reference to {}", path.display()),
                    Err(err) => {
                        error!("Saving reference failed: {}", err);
                        self.notice = Some("Could not save the reference. Please try again.".to_owned());
                    }
                }
            }
        }
    }
}

/// File name for a downloaded exemplar, e.g. `uncial-reference.png`
pub fn reference_file_name(style: &CalligraphyStyle, mime_type: &str) -> String {
    let extension = image::ImageFormat::from_mime_type(mime_type)
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("png");
    format!("{}-reference.{}", style.id, extension)
}

fn decode_preview(image: &EncodedImage) -> ServiceResult<egui::ColorImage> {
    let decoded = image::load_from_memory(&image.data).map_err(|err| {
        error!("Generated image could not be decoded: {}", err);
        crate::error::ServiceError::NoImageGenerated
    })?;
    let rgba = decoded.to_rgba8();
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        [rgba.width() as usize, rgba.height() as usize],
        rgba.as_raw(),
    ))
}
