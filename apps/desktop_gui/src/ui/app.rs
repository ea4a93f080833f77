//! Application shell: the intake form, live note previews, settings panel
//! and the transient toast.
//!
//! The app owns a [`CallFormState`] plus the persisted [`Settings`] and
//! mutates them only through [`FormCommand`] dispatch; widget closures
//! collect commands and copy requests per frame and they are applied once
//! the panels have been drawn. Both notes re-render from the latest
//! snapshot every frame.

use std::time::{Duration, Instant};

use call_core::{
    render,
    settings::{Settings, SettingsStore},
    templates, CallFormState, FieldId, FormCommand,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::domain::{
    FailReason, PassReason, Relation, SecurityIndicator, SecurityOutcome, SecurityResult,
};

use crate::backend_bridge::commands::ClipboardCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_clipboard_command;

pub const PANEL_STORAGE_KEY: &str = "callscribe.panels";

const TOAST_LIFETIME: Duration = Duration::from_millis(1600);
const COPIED_TOAST: &str = "Copied to clipboard.";
const COPY_FAILED_TOAST: &str = "Copy failed.";
const CALL_RESET_TOAST: &str = "Call reset.";

const INDICATOR_OK_COLOR: egui::Color32 = egui::Color32::from_rgb(0x2e, 0xcc, 0x71);
const INDICATOR_WARN_COLOR: egui::Color32 = egui::Color32::from_rgb(0xe7, 0x4c, 0x3c);

const RELATION_OPTIONS: [Option<Relation>; 5] = [
    None,
    Some(Relation::Caller),
    Some(Relation::Agent),
    Some(Relation::Employee),
    Some(Relation::Other),
];

const SECURITY_OPTIONS: [Option<SecurityResult>; 3] =
    [None, Some(SecurityResult::Pass), Some(SecurityResult::Fail)];

fn relation_option_label(option: Option<Relation>) -> &'static str {
    match option {
        None => "—",
        Some(relation) => relation.label(),
    }
}

fn security_option_label(option: Option<SecurityResult>) -> &'static str {
    match option {
        None => "—",
        Some(SecurityResult::Pass) => "Pass",
        Some(SecurityResult::Fail) => "Fail",
    }
}

/// Transient bottom-of-window message. A new toast supersedes any pending
/// one, cancelling the previous dismissal.
struct Toast {
    message: &'static str,
    expires_at: Instant,
}

impl Toast {
    fn new(message: &'static str) -> Self {
        Self {
            message,
            expires_at: Instant::now() + TOAST_LIFETIME,
        }
    }
}

/// Collapsing-panel flags persisted via the egui storage. Separate from
/// officer settings, which live in the settings store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedPanelState {
    pub intro_open: bool,
    pub settings_open: bool,
}

impl Default for PersistedPanelState {
    fn default() -> Self {
        Self {
            intro_open: true,
            settings_open: false,
        }
    }
}

/// Per-frame edit buffers for the free-text fields. egui owns these
/// between keystrokes; the authoritative (trimmed) values live in
/// [`CallFormState`].
#[derive(Default)]
struct FormBuffers {
    vrn: String,
    business_name: String,
    address_line: String,
    postcode: String,
    caller_name: String,
    phone_number: String,
    relation_other: String,
    agency_name: String,
    agency_address: String,
    agent_ref: String,
    brief: String,
}

impl FormBuffers {
    fn sync_from_state(&mut self, state: &CallFormState) {
        self.vrn = state.vrn.clone();
        self.business_name = state.business_name.clone();
        self.address_line = state.address_line.clone();
        self.postcode = state.postcode.clone();
        self.caller_name = state.caller_name.clone();
        self.phone_number = state.phone_number.clone();
        self.relation_other = state.relation_other.clone();
        self.agency_name = state.agency_name.clone();
        self.agency_address = state.agency_address.clone();
        self.agent_ref = state.agent_ref.clone();
        self.brief = state.brief.clone();
    }
}

pub struct CallScribeApp {
    state: CallFormState,
    settings: Settings,
    store: Box<dyn SettingsStore>,
    buffers: FormBuffers,
    template_append: bool,
    primary_note: String,
    secondary_note: String,
    clipboard_tx: Sender<ClipboardCommand>,
    ui_rx: Receiver<UiEvent>,
    toast: Option<Toast>,
    panels: PersistedPanelState,
}

impl CallScribeApp {
    pub fn new(
        store: Box<dyn SettingsStore>,
        clipboard_tx: Sender<ClipboardCommand>,
        ui_rx: Receiver<UiEvent>,
        panels: Option<PersistedPanelState>,
    ) -> Self {
        let settings = Settings::load(store.as_ref());
        let state = CallFormState::default();
        let primary_note = render::render_primary_note(&state, &settings);
        let secondary_note = render::render_secondary_note(&state, &settings);
        let mut buffers = FormBuffers::default();
        buffers.sync_from_state(&state);

        Self {
            state,
            settings,
            store,
            buffers,
            template_append: false,
            primary_note,
            secondary_note,
            clipboard_tx,
            ui_rx,
            toast: None,
            panels: panels.unwrap_or_default(),
        }
    }

    /// Applies one form command. Settings changes (reference bumps) are
    /// saved immediately; transitions that rewrite fields behind the
    /// buffers re-sync them.
    fn apply(&mut self, command: FormCommand) {
        let is_set_field = matches!(command, FormCommand::SetField { .. });
        let is_reset = matches!(command, FormCommand::ResetCall);
        let settings_before = self.settings.clone();

        self.state.apply(&mut self.settings, command);

        if self.settings != settings_before {
            self.settings.save(self.store.as_mut());
        }
        if !is_set_field {
            self.buffers.sync_from_state(&self.state);
        }
        if is_reset {
            self.show_toast(CALL_RESET_TOAST);
        }
    }

    fn request_copy(&mut self, label: &'static str, text: String) {
        let queued =
            dispatch_clipboard_command(&self.clipboard_tx, ClipboardCommand::Copy { label, text });
        if !queued {
            self.show_toast(COPY_FAILED_TOAST);
        }
    }

    fn show_toast(&mut self, message: &'static str) {
        self.toast = Some(Toast::new(message));
    }

    fn drain_worker_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::CopyFinished { label, ok } => {
                    tracing::debug!(label, ok, "copy result received");
                    self.show_toast(if ok { COPIED_TOAST } else { COPY_FAILED_TOAST });
                }
            }
        }
    }

    fn officer_display_name(&self) -> &str {
        let trimmed = self.settings.officer_name.trim();
        if trimmed.is_empty() {
            "[Name]"
        } else {
            trimmed
        }
    }

    fn header_ui(&mut self, ui: &mut egui::Ui, pending: &mut Vec<FormCommand>) {
        ui.horizontal(|ui| {
            ui.heading("CallScribe");
            let (symbol, color, tip) = match self.state.security.indicator() {
                SecurityIndicator::Ok => ("✔", INDICATOR_OK_COLOR, "Security passed"),
                SecurityIndicator::Warn => ("✖", INDICATOR_WARN_COLOR, "Security not passed"),
            };
            ui.label(egui::RichText::new(symbol).color(color).strong())
                .on_hover_text(tip);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Reset call").clicked() {
                    pending.push(FormCommand::ResetCall);
                }
            });
        });
    }

    fn intro_ui(&mut self, ui: &mut egui::Ui) {
        let response = egui::CollapsingHeader::new("Call opening")
            .default_open(self.panels.intro_open)
            .show(ui, |ui| {
                ui.label(format!(
                    "You're speaking with {}. This call is recorded for quality purposes.",
                    self.officer_display_name()
                ));
            });
        self.panels.intro_open = response.openness > 0.5;
    }

    fn settings_ui(
        &mut self,
        ui: &mut egui::Ui,
        pending: &mut Vec<FormCommand>,
        settings_changed: &mut bool,
        reset_settings: &mut bool,
    ) {
        let response = egui::CollapsingHeader::new("Settings")
            .default_open(self.panels.settings_open)
            .show(ui, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Officer name");
                        if ui
                            .text_edit_singleline(&mut self.settings.officer_name)
                            .changed()
                        {
                            *settings_changed = true;
                        }
                        ui.end_row();

                        ui.label("CCEL prefix");
                        if ui
                            .text_edit_singleline(&mut self.settings.reference_prefix)
                            .changed()
                        {
                            *settings_changed = true;
                        }
                        ui.end_row();

                        ui.label("CCEL number");
                        ui.horizontal(|ui| {
                            if ui
                                .add(
                                    egui::TextEdit::singleline(
                                        &mut self.settings.reference_number,
                                    )
                                    .desired_width(90.0),
                                )
                                .changed()
                            {
                                *settings_changed = true;
                            }
                            if ui.small_button("−").clicked() {
                                pending.push(FormCommand::BumpReferenceNumber(-1));
                            }
                            if ui.small_button("+").clicked() {
                                pending.push(FormCommand::BumpReferenceNumber(1));
                            }
                        });
                        ui.end_row();

                        ui.label("Webchat ID");
                        ui.horizontal(|ui| {
                            if ui
                                .add(
                                    egui::TextEdit::singleline(&mut self.settings.webchat_id)
                                        .desired_width(140.0),
                                )
                                .changed()
                            {
                                *settings_changed = true;
                            }
                            if ui
                                .checkbox(&mut self.settings.include_webchat_id, "Include in notes")
                                .changed()
                            {
                                *settings_changed = true;
                            }
                        });
                        ui.end_row();

                        ui.label("AUI extension");
                        ui.horizontal(|ui| {
                            if ui
                                .add(
                                    egui::TextEdit::singleline(&mut self.settings.aui_ext)
                                        .desired_width(140.0),
                                )
                                .changed()
                            {
                                *settings_changed = true;
                            }
                            if ui
                                .checkbox(&mut self.settings.include_aui_ext, "Include in notes")
                                .changed()
                            {
                                *settings_changed = true;
                            }
                        });
                        ui.end_row();
                    });

                if ui.button("Reset settings").clicked() {
                    *reset_settings = true;
                }
            });
        self.panels.settings_open = response.openness > 0.5;
    }

    fn text_row(
        ui: &mut egui::Ui,
        label: &'static str,
        buffer: &mut String,
        field: FieldId,
        pending: &mut Vec<FormCommand>,
        copies: &mut Vec<(&'static str, String)>,
    ) {
        ui.label(label);
        ui.horizontal(|ui| {
            if ui
                .add(egui::TextEdit::singleline(buffer).desired_width(220.0))
                .changed()
            {
                pending.push(FormCommand::SetField {
                    field,
                    value: buffer.clone(),
                });
            }
            if ui.small_button("Copy").clicked() {
                copies.push((label, buffer.trim().to_string()));
            }
        });
        ui.end_row();
    }

    fn call_form_ui(
        &mut self,
        ui: &mut egui::Ui,
        pending: &mut Vec<FormCommand>,
        copies: &mut Vec<(&'static str, String)>,
    ) {
        ui.heading("Call details");
        egui::Grid::new("call_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                Self::text_row(
                    ui,
                    "VRN",
                    &mut self.buffers.vrn,
                    FieldId::Vrn,
                    pending,
                    copies,
                );
                Self::text_row(
                    ui,
                    "Business name",
                    &mut self.buffers.business_name,
                    FieldId::BusinessName,
                    pending,
                    copies,
                );
                Self::text_row(
                    ui,
                    "Address line",
                    &mut self.buffers.address_line,
                    FieldId::AddressLine,
                    pending,
                    copies,
                );
                Self::text_row(
                    ui,
                    "Postcode",
                    &mut self.buffers.postcode,
                    FieldId::Postcode,
                    pending,
                    copies,
                );
                Self::text_row(
                    ui,
                    "Caller name",
                    &mut self.buffers.caller_name,
                    FieldId::CallerName,
                    pending,
                    copies,
                );
                Self::text_row(
                    ui,
                    "Phone number",
                    &mut self.buffers.phone_number,
                    FieldId::PhoneNumber,
                    pending,
                    copies,
                );

                ui.label("Relationship");
                let mut selection = self.state.relation;
                egui::ComboBox::from_id_salt("relation")
                    .selected_text(relation_option_label(selection))
                    .show_ui(ui, |ui| {
                        for option in RELATION_OPTIONS {
                            ui.selectable_value(
                                &mut selection,
                                option,
                                relation_option_label(option),
                            );
                        }
                    });
                if selection != self.state.relation {
                    pending.push(FormCommand::SetRelation(selection));
                }
                ui.end_row();

                if self.state.other_field_visible() {
                    Self::text_row(
                        ui,
                        "Relationship (other)",
                        &mut self.buffers.relation_other,
                        FieldId::RelationOther,
                        pending,
                        copies,
                    );
                }

                if self.state.agent_fields_visible() {
                    Self::text_row(
                        ui,
                        "Agency name",
                        &mut self.buffers.agency_name,
                        FieldId::AgencyName,
                        pending,
                        copies,
                    );
                    Self::text_row(
                        ui,
                        "Agency address",
                        &mut self.buffers.agency_address,
                        FieldId::AgencyAddress,
                        pending,
                        copies,
                    );
                    Self::text_row(
                        ui,
                        "Agent reference",
                        &mut self.buffers.agent_ref,
                        FieldId::AgentRef,
                        pending,
                        copies,
                    );
                }
            });

        ui.separator();
        self.security_ui(ui, pending);
        ui.separator();
        self.brief_ui(ui, pending, copies);
    }

    fn security_ui(&mut self, ui: &mut egui::Ui, pending: &mut Vec<FormCommand>) {
        ui.heading("Security check");
        ui.horizontal(|ui| {
            ui.label("Result");
            let mut selection = self.state.security.result();
            egui::ComboBox::from_id_salt("security_result")
                .selected_text(security_option_label(selection))
                .show_ui(ui, |ui| {
                    for option in SECURITY_OPTIONS {
                        ui.selectable_value(&mut selection, option, security_option_label(option));
                    }
                });
            if selection != self.state.security.result() {
                pending.push(FormCommand::SetSecurityResult(selection));
            }
        });

        match &self.state.security {
            SecurityOutcome::Pass(reasons) => {
                ui.label("Passed because:");
                for reason in PassReason::ALL {
                    let mut checked = reasons.contains(&reason);
                    if ui.checkbox(&mut checked, reason.checkbox_label()).changed() {
                        pending.push(FormCommand::TogglePassReason(reason));
                    }
                }
            }
            SecurityOutcome::Fail(reasons) => {
                ui.label("Failed because:");
                for reason in FailReason::ALL {
                    let mut checked = reasons.contains(&reason);
                    if ui.checkbox(&mut checked, reason.checkbox_label()).changed() {
                        pending.push(FormCommand::ToggleFailReason(reason));
                    }
                }
            }
            SecurityOutcome::Unset => {}
        }
    }

    fn brief_ui(
        &mut self,
        ui: &mut egui::Ui,
        pending: &mut Vec<FormCommand>,
        copies: &mut Vec<(&'static str, String)>,
    ) {
        ui.heading("Brief — what they wanted / what you did");
        ui.horizontal(|ui| {
            let selected_text = self
                .state
                .selected_template
                .clone()
                .unwrap_or_else(|| "Choose a template".to_string());
            egui::ComboBox::from_id_salt("brief_template")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for topic in templates::topics() {
                        let selected = self.state.selected_template.as_deref() == Some(topic);
                        if ui.selectable_label(selected, topic).clicked() {
                            self.state.selected_template = Some(topic.to_string());
                        }
                    }
                });
            ui.checkbox(&mut self.template_append, "Append");
            if ui.button("Insert").clicked() {
                if let Some(topic) = self.state.selected_template.clone() {
                    pending.push(FormCommand::InsertBriefTemplate {
                        topic,
                        append: self.template_append,
                    });
                }
            }
        });

        if ui
            .add(
                egui::TextEdit::multiline(&mut self.buffers.brief)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            pending.push(FormCommand::SetField {
                field: FieldId::Brief,
                value: self.buffers.brief.clone(),
            });
        }
        if ui.small_button("Copy brief").clicked() {
            copies.push(("Brief", self.buffers.brief.trim().to_string()));
        }
    }

    fn notes_ui(&mut self, ui: &mut egui::Ui, copies: &mut Vec<(&'static str, String)>) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading("CCEL note");
                if ui.small_button("Copy").clicked() {
                    copies.push(("CCEL note", self.primary_note.clone()));
                }
            });
            ui.add(
                egui::TextEdit::multiline(&mut self.primary_note.as_str())
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY),
            );

            ui.separator();

            ui.horizontal(|ui| {
                ui.heading("AUI note");
                if ui.small_button("Copy").clicked() {
                    copies.push(("AUI note", self.secondary_note.clone()));
                }
            });
            ui.add(
                egui::TextEdit::multiline(&mut self.secondary_note.as_str())
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY),
            );
        });
    }

    fn toast_ui(&mut self, ctx: &egui::Context) {
        let expired = self
            .toast
            .as_ref()
            .is_some_and(|toast| Instant::now() >= toast.expires_at);
        if expired {
            self.toast = None;
        }

        if let Some(toast) = &self.toast {
            egui::Area::new(egui::Id::new("toast"))
                .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -16.0])
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(toast.message);
                    });
                });
            ctx.request_repaint_after(toast.expires_at.saturating_duration_since(Instant::now()));
        }
    }
}

impl eframe::App for CallScribeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_worker_events();

        self.primary_note = render::render_primary_note(&self.state, &self.settings);
        self.secondary_note = render::render_secondary_note(&self.state, &self.settings);

        let mut pending: Vec<FormCommand> = Vec::new();
        let mut copies: Vec<(&'static str, String)> = Vec::new();
        let mut settings_changed = false;
        let mut reset_settings = false;

        egui::TopBottomPanel::top("header")
            .show(ctx, |ui| self.header_ui(ui, &mut pending));
        egui::SidePanel::right("notes")
            .min_width(420.0)
            .show(ctx, |ui| self.notes_ui(ui, &mut copies));
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.intro_ui(ui);
                self.settings_ui(ui, &mut pending, &mut settings_changed, &mut reset_settings);
                ui.separator();
                self.call_form_ui(ui, &mut pending, &mut copies);
            });
        });

        if reset_settings {
            self.settings = Settings::reset(self.store.as_mut());
        } else if settings_changed {
            self.settings.save(self.store.as_mut());
        }
        for command in pending {
            self.apply(command);
        }
        for (label, text) in copies {
            self.request_copy(label, text);
        }

        self.toast_ui(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.panels) {
            storage.set_string(PANEL_STORAGE_KEY, serialized);
        }
    }
}
