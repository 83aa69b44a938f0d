use std::sync::Arc;

use crate::config::AppConfig;
use crate::panels::{PracticePanel, StudyPanel, TutorPanel};
use crate::service::CalligraphyService;
use crate::style;

/// The three top-level views
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Study,
    Practice,
    Tutor,
}

impl View {
    pub const ALL: [View; 3] = [View::Study, View::Practice, View::Tutor];

    pub fn label(self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Practice => "Practice",
            Self::Tutor => "Tutor",
        }
    }
}

struct Panels {
    study: StudyPanel,
    practice: PracticePanel,
    tutor: TutorPanel,
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
///
/// Only the navigation survives a restart; the practice sheet and its
/// tool settings belong to the session.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct InkFlowApp {
    view: View,
    style_id: String,
    #[serde(skip)]
    panels: Option<Panels>,
}

impl Default for InkFlowApp {
    fn default() -> Self {
        Self {
            view: View::default(),
            style_id: style::default_style().id.to_owned(),
            panels: None,
        }
    }
}

impl InkFlowApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, service: Arc<dyn CalligraphyService>) -> Self {
        let restored: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        restored.with_service(&config, service)
    }

    /// Build the panels around `service`, keeping the restored navigation
    pub fn with_service(mut self, config: &AppConfig, service: Arc<dyn CalligraphyService>) -> Self {
        self.panels = Some(Panels {
            study: StudyPanel::new(Arc::clone(&service), &self.style_id, &config.export_dir),
            practice: PracticePanel::new(config),
            tutor: TutorPanel::new(service),
        });
        self
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) {
        log::info!("Switching to {} view", view.label());
        // The sheet stops seeing pointer events once it is hidden
        if let Some(practice) = self.practice_mut() {
            practice.cancel_gesture();
        }
        self.view = view;
    }

    pub fn practice(&self) -> Option<&PracticePanel> {
        self.panels.as_ref().map(|panels| &panels.practice)
    }

    pub fn practice_mut(&mut self) -> Option<&mut PracticePanel> {
        self.panels.as_mut().map(|panels| &mut panels.practice)
    }

    fn header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("InkFlow").strong());
                ui.label(egui::RichText::new("THE SCHOLAR").small());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for view in View::ALL.iter().rev() {
                        if ui.selectable_label(self.view == *view, view.label()).clicked() && self.view != *view {
                            self.set_view(*view);
                        }
                    }
                });
            });
        });
    }
}

impl eframe::App for InkFlowApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(panels) = &self.panels {
            self.style_id = panels.study.selected_style().id.to_owned();
        }
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.header(ctx);

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.small("InkFlow Calligraphy. Art meets Intelligence.");
            });
        });

        let view = self.view;
        let Some(panels) = self.panels.as_mut() else {
            return;
        };
        egui::CentralPanel::default().show(ctx, |ui| {
            // Dragging on the practice sheet must draw, not scroll
            egui::ScrollArea::vertical().drag_to_scroll(false).show(ui, |ui| match view {
                View::Study => panels.study.ui(ui),
                View::Practice => panels.practice.ui(ui),
                View::Tutor => panels.tutor.ui(ui),
            });
        });
    }
}
