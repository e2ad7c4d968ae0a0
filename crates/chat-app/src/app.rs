//! Main egui application — composes all panels and drives the controller.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, Key, RichText, SidePanel, TopBottomPanel};
use gloo_timers::future::TimeoutFuture;

use chat_core::controller::{export_url, ChatController};
use chat_core::event_bus::EventBus;
use chat_core::ports::{BackendPort, ClipboardPort, NavigatorPort, StoragePort};
use chat_core::search::{Debouncer, SEARCH_DEBOUNCE_MS};
use chat_platform::api::HttpBackend;
use chat_platform::clipboard::NavigatorClipboard;
use chat_platform::navigate::WindowNavigator;
use chat_platform::storage::{auto_detect_storage, LocalStorage, MemoryStorage};
use chat_types::config::{ClientConfig, StorageBackendType};
use chat_types::event::ChatEvent;
use chat_types::session::ExportFormat;
use chat_ui::panels::{conversation, directory, export};
use chat_ui::state::UiState;
use chat_ui::theme;

/// How long the "Copied"/"Failed" label stays on a copy button.
const COPY_FEEDBACK_MS: u32 = 2_000;

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    config: ClientConfig,
    event_bus: EventBus,
    controller: Rc<ChatController>,
    backend: Rc<dyn BackendPort>,
    storage: Rc<dyn StoragePort>,
    clipboard: Rc<dyn ClipboardPort>,
    navigator: Rc<dyn NavigatorPort>,
    debouncer: Rc<RefCell<Debouncer>>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = ClientConfig::default();
        let event_bus = EventBus::new();
        let controller = Rc::new(ChatController::new(event_bus.clone()));

        let backend: Rc<dyn BackendPort> =
            Rc::new(HttpBackend::new(config.api.base_url.clone()));
        let storage = storage_from_config(&config);
        log::info!("Storage backend in use: {}", storage.backend_name());

        let app = Self {
            ui_state: UiState::new(),
            config,
            event_bus,
            controller,
            backend,
            storage,
            clipboard: Rc::new(NavigatorClipboard::new()),
            navigator: Rc::new(WindowNavigator::new()),
            debouncer: Rc::new(RefCell::new(Debouncer::new())),
            first_frame: true,
        };

        app.dispatch_bootstrap();
        app
    }

    // ─── Async dispatch ──────────────────────────────────────

    fn dispatch_bootstrap(&self) {
        let controller = self.controller.clone();
        let backend = self.backend.clone();
        let storage = self.storage.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller
                .bootstrap(backend.as_ref(), storage.as_ref())
                .await;
        });
    }

    fn dispatch_send(&self, text: String, entry: usize, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let backend = self.backend.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller.send(&text, entry, backend.as_ref()).await;
            ctx.request_repaint();
        });
    }

    fn dispatch_switch(&self, id: String, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let backend = self.backend.clone();
        let storage = self.storage.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller
                .switch_to(&id, backend.as_ref(), storage.as_ref())
                .await;
            ctx.request_repaint();
        });
    }

    fn dispatch_new_chat(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let backend = self.backend.clone();
        let storage = self.storage.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller
                .create_new(backend.as_ref(), storage.as_ref())
                .await;
            ctx.request_repaint();
        });
    }

    fn dispatch_delete(&self, id: String, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let backend = self.backend.clone();
        let storage = self.storage.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller
                .delete(&id, backend.as_ref(), storage.as_ref())
                .await;
            ctx.request_repaint();
        });
    }

    fn dispatch_clear(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let backend = self.backend.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller.clear(backend.as_ref()).await;
            ctx.request_repaint();
        });
    }

    /// Start (or restart) the debounce timer for the current query.
    /// A newer keystroke bumps the generation and strands this timer.
    fn dispatch_search_debounced(&self, ctx: &egui::Context) {
        let generation = self.debouncer.borrow_mut().bump();
        let query = self.ui_state.search_text.clone();
        let controller = self.controller.clone();
        let backend = self.backend.clone();
        let debouncer = self.debouncer.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if !debouncer.borrow().is_current(generation) {
                return;
            }
            controller.run_search(&query, backend.as_ref()).await;
            ctx.request_repaint();
        });
    }

    fn dispatch_copy(&self, entry: usize, text: String, ctx: &egui::Context) {
        let clipboard = self.clipboard.clone();
        let event_bus = self.event_bus.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let ok = match clipboard.write_text(&text).await {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("clipboard write rejected: {}", e);
                    false
                }
            };
            event_bus.emit(ChatEvent::CopyResult { entry, ok });
            ctx.request_repaint();

            TimeoutFuture::new(COPY_FEEDBACK_MS).await;
            event_bus.emit(ChatEvent::CopyFeedbackExpired { entry });
            ctx.request_repaint();
        });
    }

    /// Export is a plain navigation; the modal is already closed by the
    /// time this runs. Navigation failures are rare enough that a
    /// blocking alert is acceptable.
    fn trigger_export(&self, format: ExportFormat) {
        let url = export_url(
            &self.config.api.base_url,
            &self.controller.current_session_id(),
            format,
        );
        if let Err(e) = self.navigator.navigate(&url) {
            log::error!("export navigation failed: {}", e);
            let _ = gloo_utils::window()
                .alert_with_message("Export failed. Please try again.");
        }
    }

    // ─── Keyboard surface ────────────────────────────────────

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (focus_search, new_chat) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(Key::K),
                i.modifiers.command && i.key_pressed(Key::N),
            )
        });

        if focus_search {
            self.ui_state.focus_search = true;
        }
        if new_chat {
            self.dispatch_new_chat(ctx);
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain events from the controller
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        self.handle_shortcuts(ctx);

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("AI Chat")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                let title = self
                    .ui_state
                    .sessions
                    .iter()
                    .find(|s| s.id == self.ui_state.active_session_id)
                    .map(|s| s.title.clone())
                    .unwrap_or_else(|| "New conversation".to_string());
                ui.label(
                    RichText::new(title)
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
            });
        });

        // ── Session directory (left) ─────────────────────────
        let mut directory_actions = Vec::new();
        SidePanel::left("directory_panel")
            .min_width(240.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                directory_actions = directory::directory_panel(ui, &mut self.ui_state);
            });

        // ── Conversation (center) ────────────────────────────
        let mut conversation_actions = Vec::new();
        CentralPanel::default().show(ctx, |ui| {
            conversation_actions = conversation::conversation_panel(ui, &mut self.ui_state);
        });

        // ── Modals ───────────────────────────────────────────
        if let Some(format) = export::export_modal(ctx, &mut self.ui_state) {
            self.trigger_export(format);
        }
        if let Some(session) = directory::confirm_delete_modal(ctx, &mut self.ui_state) {
            self.dispatch_delete(session.id, ctx);
        }

        // ── Apply panel actions ──────────────────────────────
        for action in conversation_actions {
            match action {
                conversation::ConversationAction::Submit { text, entry } => {
                    self.dispatch_send(text, entry, ctx);
                }
                conversation::ConversationAction::CopyCode { entry, text } => {
                    self.dispatch_copy(entry, text, ctx);
                }
            }
        }

        for action in directory_actions {
            match action {
                directory::DirectoryAction::Select(id) => {
                    // Selecting a search hit also leaves search mode
                    self.debouncer.borrow_mut().bump();
                    self.ui_state.leave_search();
                    self.dispatch_switch(id, ctx);
                }
                directory::DirectoryAction::DeleteRequested(session) => {
                    self.ui_state.confirm_delete = Some(session);
                }
                directory::DirectoryAction::NewChat => {
                    self.dispatch_new_chat(ctx);
                }
                directory::DirectoryAction::SearchChanged => {
                    self.dispatch_search_debounced(ctx);
                }
                directory::DirectoryAction::SearchCleared => {
                    self.debouncer.borrow_mut().bump();
                    self.event_bus.emit(ChatEvent::SearchCleared);
                }
                directory::DirectoryAction::OpenExport => {
                    self.ui_state.show_export = true;
                }
                directory::DirectoryAction::ClearConversation => {
                    self.dispatch_clear(ctx);
                }
            }
        }
    }
}

fn storage_from_config(config: &ClientConfig) -> Rc<dyn StoragePort> {
    match config.storage.backend {
        StorageBackendType::Auto => auto_detect_storage(),
        StorageBackendType::Memory => Rc::new(MemoryStorage::new()),
        StorageBackendType::LocalStorage => match LocalStorage::open() {
            Ok(local) => Rc::new(local),
            Err(e) => {
                log::warn!("localStorage unavailable ({}), falling back to memory", e);
                Rc::new(MemoryStorage::new())
            }
        },
    }
}
