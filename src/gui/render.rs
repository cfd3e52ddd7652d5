//! Main-window rendering functions.
//!
//! Contains UI layout and component rendering logic for the capture
//! button, the current-text area, and the history panel.

use eframe::egui::{self, Color32, RichText};

use crate::history::HistoryStore;

/// Render the title and capture button.
/// Returns true when the button was clicked.
pub fn render_header(ui: &mut egui::Ui, capture_enabled: bool) -> bool {
    let mut capture_clicked = false;

    ui.heading("Screen Text Extractor");
    ui.add_space(12.0);

    ui.add_enabled_ui(capture_enabled, |ui| {
        if ui
            .button(RichText::new("Capture Screen Text").size(16.0))
            .clicked()
        {
            capture_clicked = true;
        }
    });
    ui.label(
        RichText::new("or press Ctrl+Shift+S anywhere")
            .size(11.0)
            .color(Color32::GRAY),
    );

    capture_clicked
}

/// Render a dismissible error banner when an extraction failed.
/// Returns true when the user dismissed it.
pub fn render_error(ui: &mut egui::Ui, message: &str) -> bool {
    let mut dismissed = false;

    ui.add_space(8.0);
    egui::Frame::none()
        .fill(Color32::from_rgb(70, 30, 30))
        .inner_margin(8.0)
        .rounding(4.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(message).color(Color32::from_rgb(255, 180, 180)));
                if ui.button("Dismiss").clicked() {
                    dismissed = true;
                }
            });
        });

    dismissed
}

/// Render the current extracted text with a copy button.
/// Returns true when "Copy to Clipboard" was clicked.
pub fn render_output(ui: &mut egui::Ui, output: &str) -> bool {
    let mut copy_clicked = false;

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    ui.label(RichText::new("Extracted Text").strong());
    ui.add_space(4.0);

    egui::ScrollArea::vertical()
        .id_salt("output_area")
        .max_height(160.0)
        .show(ui, |ui| {
            // Read-only view; the pipeline owns the text.
            let mut shown = output.to_string();
            ui.add_sized(
                [ui.available_width(), 140.0],
                egui::TextEdit::multiline(&mut shown)
                    .interactive(false)
                    .font(egui::TextStyle::Monospace),
            );
        });

    ui.add_space(4.0);
    ui.add_enabled_ui(!output.is_empty(), |ui| {
        if ui.button("Copy to Clipboard").clicked() {
            copy_clicked = true;
        }
    });

    copy_clicked
}

/// Render the append-only history panel, oldest first.
pub fn render_history(ui: &mut egui::Ui, history: &HistoryStore) {
    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    ui.label(RichText::new("History").strong());
    ui.add_space(4.0);

    if history.is_empty() {
        ui.label(RichText::new("No previous extractions yet.").color(Color32::GRAY));
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("history_area")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for record in history.records() {
                ui.label(RichText::new(record.header()).color(Color32::from_rgb(255, 196, 0)));
                ui.label(RichText::new(&record.text).monospace());
                ui.separator();
            }
        });
}
