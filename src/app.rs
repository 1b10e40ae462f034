//! Main application window.

use std::path::PathBuf;

use eframe::egui;

use crate::catalog::Catalog;
use crate::export::{load_session, SessionExporter};
use crate::panel::ProjectorPanel;
use crate::ui::{self, UiState};

/// eframe application hosting the projector panel.
pub struct PlannerApp {
    panel: ProjectorPanel,
    ui_state: UiState,
    /// Session file used by Save / Reload.
    session_path: Option<PathBuf>,
}

impl PlannerApp {
    /// Create the app, restoring `session_path` when it exists.
    pub fn new(session_path: Option<PathBuf>) -> Self {
        let mut message = None;
        let panel = match session_path.as_deref().filter(|p| p.exists()) {
            Some(path) => match load_session(path) {
                Ok(settings) => ProjectorPanel::from_settings(Catalog::builtin(), settings),
                Err(e) => {
                    log::error!("Failed to load session {}: {}", path.display(), e);
                    message = Some(e.to_string());
                    ProjectorPanel::default()
                }
            },
            None => ProjectorPanel::default(),
        };

        let mut ui_state = UiState::for_panel(&panel);
        ui_state.message = message;

        Self {
            panel,
            ui_state,
            session_path,
        }
    }

    pub fn panel(&self) -> &ProjectorPanel {
        &self.panel
    }

    fn save(&mut self) {
        let Some(path) = self.session_path.clone() else {
            return;
        };
        self.ui_state.message = SessionExporter::save(&self.panel.to_settings(), &path)
            .err()
            .map(|e| {
                log::error!("Failed to save session: {}", e);
                e.to_string()
            });
    }

    fn reload(&mut self) {
        let Some(path) = self.session_path.clone() else {
            return;
        };
        match load_session(&path) {
            Ok(settings) => {
                self.panel = ProjectorPanel::from_settings(Catalog::builtin(), settings);
                self.ui_state = UiState::for_panel(&self.panel);
            }
            Err(e) => {
                log::error!("Failed to reload session: {}", e);
                self.ui_state.message = Some(e.to_string());
            }
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Projection Mapping");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let has_path = self.session_path.is_some();
                    if ui.add_enabled(has_path, egui::Button::new("Reload")).clicked() {
                        self.reload();
                    }
                    if ui.add_enabled(has_path, egui::Button::new("Save")).clicked() {
                        self.save();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(self.panel.footer_label());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui::show(ui, &mut self.panel, &mut self.ui_state);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_without_session() {
        let app = PlannerApp::new(None);
        assert_eq!(app.panel().footer_label(), "No projector");
        assert!(app.ui_state.message.is_none());
    }

    #[test]
    fn test_new_restores_session() {
        let dir = std::env::temp_dir().join(format!("projector-planner-app-{}", std::process::id()));
        let path = dir.join("session.json");

        let mut panel = ProjectorPanel::default();
        panel.select_brand(Some("panasonic")).unwrap();
        panel.select_projector(Some("pana-4k")).unwrap();
        SessionExporter::save(&panel.to_settings(), &path).unwrap();

        let app = PlannerApp::new(Some(path));
        assert_eq!(app.panel().footer_label(), "Panasonic PT-RQ35K");

        std::fs::remove_dir_all(&dir).ok();
    }
}
