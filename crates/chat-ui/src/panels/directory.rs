//! Session directory panel — session list, search box, grouped results.

use egui::{self, Align, Key, Layout, RichText, ScrollArea};
use chat_core::search::{highlight_spans, snippet, SearchGroup, SNIPPET_MAX_CHARS};
use chat_types::session::SessionSummary;
use crate::state::{DirectoryView, UiState};
use crate::theme::*;

/// What the app layer should do after rendering the panel
pub enum DirectoryAction {
    /// Switch to this session (also used from search results)
    Select(String),
    /// User asked to delete; a confirmation modal opens first
    DeleteRequested(SessionSummary),
    NewChat,
    /// Search text changed to a non-empty query: reset the debounce timer
    SearchChanged,
    /// Search text became empty: leave search mode immediately
    SearchCleared,
    OpenExport,
    ClearConversation,
}

pub fn directory_panel(ui: &mut egui::Ui, state: &mut UiState) -> Vec<DirectoryAction> {
    let mut actions = Vec::new();

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header with the session-level actions
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Conversations").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui
                            .button(RichText::new("New").color(TEXT_PRIMARY))
                            .clicked()
                        {
                            actions.push(DirectoryAction::NewChat);
                        }
                    });
                });

                ui.horizontal(|ui| {
                    if ui
                        .small_button(RichText::new("Export").color(TEXT_SECONDARY))
                        .clicked()
                    {
                        actions.push(DirectoryAction::OpenExport);
                    }
                    if ui
                        .small_button(RichText::new("Clear chat").color(TEXT_SECONDARY))
                        .clicked()
                    {
                        actions.push(DirectoryAction::ClearConversation);
                    }
                });

                ui.add_space(4.0);

                // Search box, debounced by the app layer
                let search = egui::TextEdit::singleline(&mut state.search_text)
                    .hint_text("Search messages… (Ctrl+K)")
                    .desired_width(f32::INFINITY);
                let response = ui.add(search);

                if state.focus_search {
                    response.request_focus();
                    state.focus_search = false;
                }

                if response.changed() {
                    if state.search_text.trim().is_empty() {
                        actions.push(DirectoryAction::SearchCleared);
                    } else {
                        actions.push(DirectoryAction::SearchChanged);
                    }
                }

                ui.separator();

                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| match &state.directory {
                        DirectoryView::Sessions => {
                            render_sessions(
                                ui,
                                &state.sessions,
                                &state.active_session_id,
                                &mut actions,
                            );
                        }
                        DirectoryView::SearchResults { query, groups } => {
                            render_search_results(ui, query, groups, &mut actions);
                        }
                    });
            });
        });

    actions
}

fn render_sessions(
    ui: &mut egui::Ui,
    sessions: &[SessionSummary],
    active_id: &str,
    actions: &mut Vec<DirectoryAction>,
) {
    if sessions.is_empty() {
        ui.label(
            RichText::new("No conversations yet")
                .color(TEXT_SECONDARY)
                .small()
                .italics(),
        );
        return;
    }

    for session in sessions {
        let is_active = session.id == active_id;
        let bg = if is_active { BG_SURFACE } else { BG_SECONDARY };

        egui::Frame::default()
            .fill(bg)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(6.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let title_color = if is_active { ACCENT } else { TEXT_PRIMARY };
                    let title = ui.add(
                        egui::Label::new(
                            RichText::new(snippet(&session.title, 40)).color(title_color),
                        )
                        .truncate()
                        .sense(egui::Sense::click()),
                    );
                    if title.clicked() {
                        actions.push(DirectoryAction::Select(session.id.clone()));
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui
                            .small_button(RichText::new("✕").color(TEXT_SECONDARY))
                            .clicked()
                        {
                            actions.push(DirectoryAction::DeleteRequested(session.clone()));
                        }
                    });
                });
                ui.label(
                    RichText::new(format!("{} messages", session.message_count))
                        .color(TEXT_SECONDARY)
                        .small(),
                );
            });
        ui.add_space(2.0);
    }
}

fn render_search_results(
    ui: &mut egui::Ui,
    query: &str,
    groups: &[SearchGroup],
    actions: &mut Vec<DirectoryAction>,
) {
    if groups.is_empty() {
        ui.label(
            RichText::new(format!("No results for \"{}\"", query))
                .color(TEXT_SECONDARY)
                .italics(),
        );
        return;
    }

    for group in groups {
        ui.label(
            RichText::new(&group.session_title)
                .color(ACCENT)
                .strong()
                .small(),
        );

        for hit in &group.hits {
            let row = egui::Frame::default()
                .fill(BG_SURFACE)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(6.0)
                .show(ui, |ui| {
                    render_snippet(ui, &hit.content, query);
                });
            if row
                .response
                .interact(egui::Sense::click())
                .clicked()
            {
                actions.push(DirectoryAction::Select(group.session_id.clone()));
            }
            ui.add_space(2.0);
        }

        if group.hidden > 0 {
            ui.label(
                RichText::new(format!("+{} more", group.hidden))
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );
        }
        ui.add_space(6.0);
    }
}

/// One snippet line with the query occurrences highlighted, original
/// casing preserved.
fn render_snippet(ui: &mut egui::Ui, content: &str, query: &str) {
    let shortened = snippet(content, SNIPPET_MAX_CHARS);
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in highlight_spans(&shortened, query) {
            let mut text = RichText::new(&span.text).color(TEXT_PRIMARY).small();
            if span.highlighted {
                text = text.background_color(HIGHLIGHT_BG).color(TEXT_PRIMARY);
            }
            ui.label(text);
        }
    });
}

/// Destructive-action guard: modal confirmation before a delete request
/// is actually issued. Returns the session to delete once confirmed.
pub fn confirm_delete_modal(ctx: &egui::Context, state: &mut UiState) -> Option<SessionSummary> {
    let session = state.confirm_delete.clone()?;
    let mut confirmed = None;
    let mut open = true;

    egui::Window::new("Delete conversation?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new(format!(
                    "\"{}\" and all its messages will be deleted. This cannot be undone.",
                    snippet(&session.title, 40)
                ))
                .color(TEXT_PRIMARY),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new("Delete").color(ERROR).strong())
                    .clicked()
                {
                    confirmed = Some(session.clone());
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
        state.confirm_delete = None;
    }
    confirmed
}
