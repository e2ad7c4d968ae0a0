//! Export modal — format selector for the download endpoint.

use egui::{self, Key, RichText};
use chat_types::session::ExportFormat;
use crate::state::UiState;
use crate::theme::*;

/// The format the user asked to download, if any. The modal closes
/// immediately on either choice; the navigation itself happens in the
/// app layer.
pub fn export_modal(ctx: &egui::Context, state: &mut UiState) -> Option<ExportFormat> {
    if !state.show_export {
        return None;
    }

    let mut chosen = None;
    let mut open = true;

    egui::Window::new("Export conversation")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new("Format").color(TEXT_SECONDARY).small());
            egui::ComboBox::from_id_salt("export_format")
                .selected_text(state.export_format.label())
                .show_ui(ui, |ui| {
                    for format in ExportFormat::all() {
                        ui.selectable_value(&mut state.export_format, *format, format.label());
                    }
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new("Download").color(TEXT_PRIMARY).strong())
                    .clicked()
                {
                    chosen = Some(state.export_format);
                    open = false;
                }
                if ui.button("Cancel").clicked() {
                    open = false;
                }
            });
        });

    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        open = false;
    }
    if !open {
        state.show_export = false;
    }
    chosen
}
