//! Main application state and update loop
//!
//! The handler layer is thin: egui gestures become [`WorkflowController`]
//! calls, remote operations run on [`crate::runtime`] and report back through
//! shared inboxes drained at the start of every frame.

use eframe::egui;
use std::sync::{Arc, Mutex};

use inkcrypt_adapters::{HttpSigningService, PlatformDownload};
use inkcrypt_core::{
    Document, OperationClient, OperationError, OperationKind, OperationOutcome, PreparedOperation,
    ServiceHealth, Slot, Tab, WorkflowController,
};

use crate::ui;

type ShellClient = OperationClient<HttpSigningService, PlatformDownload>;

/// Acquire mutex lock, recovering from poisoned state if necessary.
macro_rules! lock_or_recover {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    };
}

pub struct App {
    workflow: WorkflowController,
    client: Arc<ShellClient>,
    base_url: String,
    /// Outcomes of finished operations, in completion order
    completed: Arc<Mutex<Vec<(OperationKind, OperationOutcome)>>>,
    /// File chosen through the dialog
    picked: Arc<Mutex<Option<(Slot, Document)>>>,
    health_result: Arc<Mutex<Option<ServiceHealth>>>,
    health: Option<ServiceHealth>,
    health_loading: bool,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        service: HttpSigningService,
        downloads: PlatformDownload,
    ) -> Self {
        let base_url = service.config().service_base_url.clone();
        let mut app = Self {
            workflow: WorkflowController::new(),
            client: Arc::new(OperationClient::new(service, downloads)),
            base_url,
            completed: Arc::new(Mutex::new(Vec::new())),
            picked: Arc::new(Mutex::new(None)),
            health_result: Arc::new(Mutex::new(None)),
            health: None,
            health_loading: false,
        };
        app.trigger_health_check(&cc.egui_ctx);
        app
    }
}

fn tab_slot(tab: Tab) -> Option<Slot> {
    match tab {
        Tab::Sign => Some(Slot::Sign),
        Tab::Verify => Some(Slot::Verify),
        Tab::Revoke => None,
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.check_completed();
        self.check_picked();
        self.check_health_result();
        self.handle_file_drops(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("🖋 InkCrypt")
                        .size(22.0)
                        .color(ui::ACCENT),
                );
                ui.add_space(30.0);
                ui.separator();
                ui.add_space(10.0);
                for tab in Tab::ALL {
                    let active = self.workflow.active_tab() == tab;
                    if ui.selectable_label(active, tab.label()).clicked() {
                        self.workflow.activate_tab(tab);
                    }
                }
            });
            ui.add_space(4.0);
            self.render_service_status(ui, ctx);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                match self.workflow.active_tab() {
                    Tab::Sign => self.render_document_tab(ui, ctx, OperationKind::Sign),
                    Tab::Verify => self.render_document_tab(ui, ctx, OperationKind::Verify),
                    Tab::Revoke => self.render_revoke_tab(ui, ctx),
                }
                ui.add_space(15.0);
                self.render_results(ui);
                ui.add_space(20.0);
            });
        });

        if self.workflow.is_busy() {
            ui::busy_overlay(ctx);
        }
    }
}

impl App {
    fn render_service_status(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&self.base_url).monospace().small());
            match &self.health {
                Some(ServiceHealth::Online(message)) => {
                    ui.label(
                        egui::RichText::new(format!("● {message}"))
                            .small()
                            .color(egui::Color32::LIGHT_GREEN),
                    );
                }
                Some(ServiceHealth::Offline(reason)) => {
                    ui.label(
                        egui::RichText::new("● offline")
                            .small()
                            .color(egui::Color32::LIGHT_RED),
                    )
                    .on_hover_text(reason);
                }
                None => {}
            }
            if self.health_loading {
                ui.spinner();
            } else if ui
                .small_button("⟳")
                .on_hover_text("Check service status")
                .clicked()
            {
                self.trigger_health_check(ctx);
            }
        });
    }

    fn render_document_tab(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, kind: OperationKind) {
        let Some(slot) = kind.slot() else {
            return;
        };
        let (heading, blurb, button) = match slot {
            Slot::Sign => (
                "Sign a PDF",
                "Upload a PDF to receive a digitally signed copy.",
                "✍ Sign PDF",
            ),
            Slot::Verify => (
                "Verify a PDF",
                "Check whether a signed PDF is authentic and still valid.",
                "🔍 Verify PDF",
            ),
        };

        ui::styled_heading(ui, heading);
        ui.label(blurb);
        ui.add_space(15.0);

        let slot_state = self.workflow.state().selection.slot(slot);
        let clicked = ui::upload_target(
            ui,
            &format!("{kind}_upload"),
            &slot_state.display_text(),
            slot_state.is_ready(),
            slot_state.drag_hover(),
        )
        .clicked();
        if clicked {
            self.pick_file(slot, ctx);
        }

        ui.add_space(10.0);
        let enabled = self.workflow.can_dispatch(kind);
        if ui
            .add_enabled(enabled, egui::Button::new(button).min_size(egui::vec2(140.0, 32.0)))
            .clicked()
        {
            self.dispatch(kind, ctx);
        }
    }

    fn render_revoke_tab(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui::styled_heading(ui, "Revoke a Signature");
        ui.label("Revoked documents fail verification from then on.");
        ui.add_space(15.0);

        let mut submitted = false;
        ui.horizontal(|ui| {
            ui.label("Document UUID:");
            let response = ui.add(
                egui::TextEdit::singleline(self.workflow.revoke_input_mut())
                    .hint_text("e.g. 3f2c9a4e-...")
                    .desired_width(320.0)
                    .font(egui::TextStyle::Monospace),
            );
            submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        });

        ui.add_space(10.0);
        let clicked = ui
            .add(egui::Button::new("🚫 Revoke").min_size(egui::vec2(140.0, 32.0)))
            .clicked();
        if clicked || submitted {
            self.dispatch(OperationKind::Revoke, ctx);
        }
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        let Some(view) = self.workflow.presenter().view() else {
            return;
        };
        let response = ui::result_panel(ui, &view);
        if self.workflow.presenter_mut().take_scroll_request() {
            response.scroll_to_me(Some(egui::Align::Center));
        }
    }

    // =========================================================================
    // GESTURES
    // =========================================================================

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let Some(slot) = tab_slot(self.workflow.active_tab()) else {
            return;
        };
        let (hovering, dropped) =
            ctx.input(|i| (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.clone()));

        if !dropped.is_empty() {
            let documents: Vec<Document> = dropped.into_iter().filter_map(dropped_document).collect();
            if !self.workflow.drop_files(slot, documents) {
                tracing::debug!(?slot, "drop ignored");
            }
        } else if hovering {
            self.workflow.drag_over(slot);
        } else if self.workflow.state().selection.slot(slot).drag_hover() {
            self.workflow.drag_leave(slot);
        }
    }

    fn pick_file(&self, slot: Slot, ctx: &egui::Context) {
        let inbox = Arc::clone(&self.picked);
        let ctx = ctx.clone();
        let spawned = crate::runtime::spawn(move || async move {
            let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter("PDF", &["pdf"])
                .pick_file()
                .await
            else {
                return;
            };
            #[cfg(target_arch = "wasm32")]
            let declared = Some(handle.inner().type_());
            #[cfg(not(target_arch = "wasm32"))]
            let declared: Option<String> = None;

            let bytes = handle.read().await;
            let document = Document::from_upload(handle.file_name(), declared.as_deref(), bytes);
            *lock_or_recover!(inbox) = Some((slot, document));
            ctx.request_repaint();
        });
        if let Err(e) = spawned {
            tracing::error!(error = %e, "could not open file dialog");
        }
    }

    fn dispatch(&mut self, kind: OperationKind, ctx: &egui::Context) {
        if let Some(operation) = self.workflow.begin(kind) {
            self.spawn_operation(operation, ctx);
        }
    }

    fn spawn_operation(&mut self, operation: PreparedOperation, ctx: &egui::Context) {
        let kind = operation.kind();
        let client = Arc::clone(&self.client);
        let inbox = Arc::clone(&self.completed);
        let repaint = ctx.clone();

        let spawned = crate::runtime::spawn(move || async move {
            let outcome = operation.execute(&client).await;
            lock_or_recover!(inbox).push((kind, outcome));
            repaint.request_repaint();
        });

        if let Err(e) = spawned {
            self.workflow
                .complete(kind, OperationError::Transport(e).into_outcome(kind));
        }
    }

    fn trigger_health_check(&mut self, ctx: &egui::Context) {
        if self.health_loading {
            return;
        }
        self.health_loading = true;

        let client = Arc::clone(&self.client);
        let result = Arc::clone(&self.health_result);
        let ctx = ctx.clone();
        let spawned = crate::runtime::spawn(move || async move {
            let health = client.health().await;
            *lock_or_recover!(result) = Some(health);
            ctx.request_repaint();
        });

        if let Err(e) = spawned {
            self.health_loading = false;
            self.health = Some(ServiceHealth::Offline(e));
        }
    }

    // =========================================================================
    // INBOXES
    // =========================================================================

    fn check_completed(&mut self) {
        let finished = std::mem::take(&mut *lock_or_recover!(self.completed));
        for (kind, outcome) in finished {
            self.workflow.complete(kind, outcome);
        }
    }

    fn check_picked(&mut self) {
        let picked = lock_or_recover!(self.picked).take();
        if let Some((slot, document)) = picked {
            if !self.workflow.pick_file(slot, document) {
                tracing::debug!(?slot, "picked file ignored");
            }
        }
    }

    fn check_health_result(&mut self) {
        let result = lock_or_recover!(self.health_result).take();
        if let Some(health) = result {
            self.health_loading = false;
            self.health = Some(health);
        }
    }
}

/// Convert an egui drop into a document. Browsers deliver bytes and a MIME
/// type; native drops only carry a path.
fn dropped_document(file: egui::DroppedFile) -> Option<Document> {
    let name = if file.name.is_empty() {
        file.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())?
    } else {
        file.name.clone()
    };
    let declared = (!file.mime.is_empty()).then(|| file.mime.clone());

    let bytes: Arc<[u8]> = match (file.bytes, file.path) {
        (Some(bytes), _) => bytes,
        (None, Some(path)) => match std::fs::read(&path) {
            Ok(bytes) => bytes.into(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read dropped file");
                return None;
            }
        },
        (None, None) => return None,
    };

    Some(Document::from_upload(name, declared.as_deref(), bytes))
}
