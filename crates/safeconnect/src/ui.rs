//! UI helper components

use eframe::egui;

use safeconnect_session_core::Classification;

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(egui::Color32::from_rgb(0, 212, 170)));
}

/// Section header with separator
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

/// Labeled monospace value row
pub fn mono_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("{label}:")).strong());
        ui.label(egui::RichText::new(value).monospace());
    });
}

/// Create a styled single-line text edit
pub fn text_input(
    ui: &mut egui::Ui,
    value: &mut String,
    hint: &str,
    width: f32,
) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(width)
            .font(egui::TextStyle::Monospace),
    )
}

pub fn classification_color(classification: Classification) -> egui::Color32 {
    match classification {
        Classification::Verified => egui::Color32::from_rgb(0, 212, 170),
        Classification::Warning => egui::Color32::from_rgb(220, 180, 50),
        Classification::Error => egui::Color32::from_rgb(220, 50, 50),
    }
}
