//! Conversation panel — message list, typing placeholder, input box.

use egui::{self, Align, Color32, Key, Layout, RichText, ScrollArea, Vec2};
use chat_types::message::Sender;
use crate::state::{ChatEntry, CopyState, UiState, TYPING_TEXT};
use crate::theme::*;

/// What the app layer should do after rendering the panel
pub enum ConversationAction {
    /// User submitted non-empty input; the optimistic entry is already
    /// appended at `entry`
    Submit { text: String, entry: usize },
    /// Copy an entry's code block text to the clipboard
    CopyCode { entry: usize, text: String },
}

/// Render the conversation panel. Input is disabled for the whole
/// duration of an in-flight send; Enter submits, Shift+Enter breaks
/// the line.
pub fn conversation_panel(ui: &mut egui::Ui, state: &mut UiState) -> Vec<ConversationAction> {
    let mut actions = Vec::new();

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Chat").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let (status, color) = if state.is_busy() {
                            ("Waiting for reply…", WARNING)
                        } else {
                            ("Ready", SUCCESS)
                        };
                        ui.label(RichText::new(status).color(color).small());
                    });
                });

                ui.separator();

                // Messages area
                let available_height = ui.available_height() - 80.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for (index, entry) in state.entries.iter().enumerate() {
                            if let Some(action) = render_entry(ui, index, entry) {
                                actions.push(action);
                            }
                            ui.add_space(4.0);
                        }

                        if state.typing {
                            egui::Frame::default()
                                .fill(BG_SECONDARY)
                                .corner_radius(PANEL_ROUNDING)
                                .inner_margin(8.0)
                                .show(ui, |ui| {
                                    ui.label(
                                        RichText::new(TYPING_TEXT)
                                            .color(TEXT_SECONDARY)
                                            .italics(),
                                    );
                                });
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::multiline(&mut state.input_text)
                        .hint_text("Type a message… (Enter to send, Shift+Enter for newline)")
                        .desired_rows(2)
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add_enabled(!state.sending, input);

                    if state.focus_input && !state.sending {
                        response.request_focus();
                        state.focus_input = false;
                    }

                    // Enter without Shift submits; egui has already
                    // inserted the newline, so strip it back out.
                    let enter_pressed = response.has_focus()
                        && ui.input(|i| i.key_pressed(Key::Enter) && !i.modifiers.shift);
                    if enter_pressed {
                        while state.input_text.ends_with('\n') {
                            state.input_text.pop();
                        }
                    }

                    let can_send = !state.input_text.trim().is_empty() && !state.sending;
                    let send_btn = ui.add_enabled(
                        can_send,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if can_send { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    if (enter_pressed && can_send) || send_btn.clicked() {
                        let text = state.input_text.trim().to_string();
                        let entry = state.push_user_entry(&text);
                        actions.push(ConversationAction::Submit { text, entry });
                        state.input_text.clear();
                        response.request_focus();
                    }
                });
            });
        });

    actions
}

fn render_entry(ui: &mut egui::Ui, index: usize, entry: &ChatEntry) -> Option<ConversationAction> {
    let mut action = None;

    let (label, label_color, bg) = if entry.is_error {
        ("Error", ERROR, ERROR_BG)
    } else {
        let color = match entry.sender {
            Sender::User => ACCENT,
            Sender::Assistant => SUCCESS,
        };
        (entry.sender.label(), color, BG_SECONDARY)
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(label).color(label_color).strong().small());
                if !entry.code_blocks.is_empty() {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(a) = copy_button(ui, index, entry) {
                            action = Some(a);
                        }
                    });
                }
            });
            ui.label(RichText::new(&entry.text).color(TEXT_PRIMARY));
        });

    action
}

fn copy_button(ui: &mut egui::Ui, index: usize, entry: &ChatEntry) -> Option<ConversationAction> {
    let (label, color) = match entry.copy_state {
        CopyState::Idle => ("Copy", TEXT_SECONDARY),
        CopyState::Copied => ("Copied", SUCCESS),
        CopyState::Failed => ("Failed", ERROR),
    };

    let clicked = ui
        .add(
            egui::Button::new(RichText::new(label).color(color).small())
                .fill(Color32::TRANSPARENT)
                .corner_radius(PANEL_ROUNDING),
        )
        .clicked();

    if clicked && entry.copy_state == CopyState::Idle {
        Some(ConversationAction::CopyCode {
            entry: index,
            text: entry.code_blocks.join("\n\n"),
        })
    } else {
        None
    }
}
