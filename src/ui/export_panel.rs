//! Right-hand panel showing the scene in export form, with copy, save and import.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use std::path::{Path, PathBuf};

use crate::canvas::ActiveDrawing;
use crate::config::{AppConfig, ExportFormat, SetExportFormatRequest, UpdateLastExportPathRequest};
use crate::model::{tikz, Drawing};
use crate::theme;

/// Outcome of the last export panel action
#[derive(Debug, Clone, PartialEq)]
pub enum ExportStatus {
    Info(String),
    Error(String),
}

#[derive(Resource, Default)]
pub struct ExportPanelState {
    pub status: Option<ExportStatus>,
    /// Pending async save dialog
    pub pending_save: Option<Task<Option<PathBuf>>>,
    /// Pending async open dialog for importing a description
    pub pending_import: Option<Task<Option<PathBuf>>>,
}

impl ExportPanelState {
    pub fn any_dialog_pending(&self) -> bool {
        self.pending_save.is_some() || self.pending_import.is_some()
    }
}

/// The drawing rendered in the chosen export format
pub fn export_text(drawing: &Drawing, format: ExportFormat, tikz_scale: f64) -> String {
    match format {
        ExportFormat::Description => drawing.serialize(),
        ExportFormat::Tikz => tikz::to_tikz(drawing.scene(), tikz_scale),
    }
}

/// File name offered by the save dialog
fn suggested_file_name(last_path: Option<&Path>, format: ExportFormat) -> String {
    let stem = last_path
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "drawing".to_string());
    format!("{}.{}", stem, format.file_extension())
}

fn write_export(path: &Path, contents: &str) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }
    std::fs::write(path, contents).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

fn import_file(drawing: &mut Drawing, path: &Path) -> Result<usize, String> {
    let description = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    drawing
        .import(&description)
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// Export panel UI system
pub fn export_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<ExportPanelState>,
    mut active: ResMut<ActiveDrawing>,
    config: Res<AppConfig>,
    mut format_events: MessageWriter<SetExportFormatRequest>,
    mut path_events: MessageWriter<UpdateLastExportPathRequest>,
) -> Result {
    let format = config.data.export_format;
    let text = export_text(&active.drawing, format, config.data.tikz_scale);

    // Poll pending dialogs
    if let Some(ref mut task) = panel.pending_save
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        panel.pending_save = None;
        if let Some(path) = result {
            panel.status = Some(match write_export(&path, &text) {
                Ok(()) => {
                    info!("Exported drawing to {:?}", path);
                    let message = format!("Saved {}", path.display());
                    path_events.write(UpdateLastExportPathRequest { path });
                    ExportStatus::Info(message)
                }
                Err(e) => {
                    error!("{}", e);
                    ExportStatus::Error(e)
                }
            });
        }
    }

    if let Some(ref mut task) = panel.pending_import
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        panel.pending_import = None;
        if let Some(path) = result {
            panel.status = Some(match import_file(&mut active.drawing, &path) {
                Ok(count) => {
                    info!("Imported {} elements from {:?}", count, path);
                    ExportStatus::Info(format!("Imported {} elements", count))
                }
                Err(e) => {
                    warn!("Import failed: {}", e);
                    ExportStatus::Error(e)
                }
            });
        }
    }

    let mut should_save = false;
    let mut should_import = false;

    egui::SidePanel::right("export_panel")
        .default_width(280.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Export");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for candidate in [ExportFormat::Tikz, ExportFormat::Description] {
                        if ui
                            .selectable_label(format == candidate, candidate.display_name())
                            .clicked()
                        {
                            format_events.write(SetExportFormatRequest { format: candidate });
                        }
                    }
                });
            });

            ui.horizontal(|ui| {
                if ui
                    .button("Copy")
                    .on_hover_text("Copy the export text to the clipboard")
                    .clicked()
                {
                    ui.ctx().copy_text(text.clone());
                    panel.status = Some(ExportStatus::Info("Copied to clipboard".to_string()));
                }

                if ui
                    .add_enabled(!panel.any_dialog_pending(), egui::Button::new("Save..."))
                    .clicked()
                {
                    should_save = true;
                }

                if ui
                    .add_enabled(!panel.any_dialog_pending(), egui::Button::new("Import..."))
                    .on_hover_text("Append elements from a scene description file")
                    .clicked()
                {
                    should_import = true;
                }
            });

            if let Some(status) = &panel.status {
                match status {
                    ExportStatus::Info(message) => {
                        ui.colored_label(theme::ui::SUCCESS_TEXT, message.as_str());
                    }
                    ExportStatus::Error(message) => {
                        ui.colored_label(theme::ui::ERROR_TEXT, message.as_str());
                    }
                }
            }

            ui.separator();

            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if text.is_empty() {
                        ui.label(
                            egui::RichText::new("Nothing drawn yet")
                                .color(theme::ui::HINT_TEXT)
                                .italics(),
                        );
                    } else {
                        ui.add(
                            egui::TextEdit::multiline(&mut text.as_str())
                                .font(egui::TextStyle::Monospace)
                                .desired_width(f32::INFINITY),
                        );
                    }
                });
        });

    // Handle save button - spawn async dialog
    if should_save && !panel.any_dialog_pending() {
        let last_path = config.data.last_export_path.clone();
        let directory = last_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(crate::paths::exports_dir);
        let file_name = suggested_file_name(last_path.as_deref(), format);
        let extension = format.file_extension();
        let task_pool = AsyncComputeTaskPool::get();
        panel.pending_save = Some(task_pool.spawn(async move {
            rfd::AsyncFileDialog::new()
                .set_title("Save Drawing")
                .add_filter(format.display_name(), &[extension])
                .set_directory(directory)
                .set_file_name(file_name)
                .save_file()
                .await
                .map(|h| h.path().to_path_buf())
        }));
    }

    // Handle import button - spawn async dialog
    if should_import && !panel.any_dialog_pending() {
        let directory = crate::paths::exports_dir();
        let task_pool = AsyncComputeTaskPool::get();
        panel.pending_import = Some(task_pool.spawn(async move {
            rfd::AsyncFileDialog::new()
                .set_title("Import Scene Description")
                .add_filter("Scene description", &["txt"])
                .set_directory(directory)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        }));
    }

    Ok(())
}
