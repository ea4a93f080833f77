//! Call intake form state machine and deterministic note rendering.
//!
//! [`CallFormState`] holds everything an officer enters about the current
//! call and owns the transition rules that keep dependent fields consistent
//! (agency details only while the relationship is Agent, security reasons
//! only inside the matching outcome variant). [`render`] turns a snapshot of
//! that state plus the persisted [`settings::Settings`] into the two
//! paste-ready case notes. Every operation here is synchronous and total.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use shared::domain::{FailReason, PassReason, Relation, SecurityOutcome, SecurityResult};

pub mod render;
pub mod settings;
pub mod templates;

use settings::Settings;

/// Free-text fields of the intake form, addressable for generic dispatch
/// and per-field copy affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Vrn,
    BusinessName,
    AddressLine,
    Postcode,
    CallerName,
    PhoneNumber,
    RelationOther,
    AgencyName,
    AgencyAddress,
    AgentRef,
    Brief,
}

/// Officer-entered data for the current call. Reset between calls;
/// settings live in [`Settings`] and are explicitly excluded from reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallFormState {
    pub vrn: String,
    pub business_name: String,
    pub address_line: String,
    pub postcode: String,
    pub caller_name: String,
    pub phone_number: String,
    pub relation: Option<Relation>,
    pub relation_other: String,
    pub agency_name: String,
    pub agency_address: String,
    pub agent_ref: String,
    pub security: SecurityOutcome,
    pub brief: String,
    pub selected_template: Option<String>,
}

/// The explicit command table the front end dispatches through. One variant
/// per transition; applying a command can never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    SetField { field: FieldId, value: String },
    SetRelation(Option<Relation>),
    SetSecurityResult(Option<SecurityResult>),
    TogglePassReason(PassReason),
    ToggleFailReason(FailReason),
    BumpReferenceNumber(i64),
    InsertBriefTemplate { topic: String, append: bool },
    ResetCall,
}

impl CallFormState {
    /// Stores the trimmed value. Empty is a valid value; it renders as the
    /// field's fallback marker.
    pub fn set_field(&mut self, field: FieldId, value: &str) {
        *self.field_mut(field) = value.trim().to_string();
    }

    pub fn field(&self, field: FieldId) -> &str {
        match field {
            FieldId::Vrn => &self.vrn,
            FieldId::BusinessName => &self.business_name,
            FieldId::AddressLine => &self.address_line,
            FieldId::Postcode => &self.postcode,
            FieldId::CallerName => &self.caller_name,
            FieldId::PhoneNumber => &self.phone_number,
            FieldId::RelationOther => &self.relation_other,
            FieldId::AgencyName => &self.agency_name,
            FieldId::AgencyAddress => &self.agency_address,
            FieldId::AgentRef => &self.agent_ref,
            FieldId::Brief => &self.brief,
        }
    }

    fn field_mut(&mut self, field: FieldId) -> &mut String {
        match field {
            FieldId::Vrn => &mut self.vrn,
            FieldId::BusinessName => &mut self.business_name,
            FieldId::AddressLine => &mut self.address_line,
            FieldId::Postcode => &mut self.postcode,
            FieldId::CallerName => &mut self.caller_name,
            FieldId::PhoneNumber => &mut self.phone_number,
            FieldId::RelationOther => &mut self.relation_other,
            FieldId::AgencyName => &mut self.agency_name,
            FieldId::AgencyAddress => &mut self.agency_address,
            FieldId::AgentRef => &mut self.agent_ref,
            FieldId::Brief => &mut self.brief,
        }
    }

    /// Changes the relationship. Agency details must never leak into a note
    /// for a non-agent call, so they are cleared (not merely hidden) on any
    /// transition away from Agent; the Other free-text clears symmetrically.
    pub fn set_relation(&mut self, relation: Option<Relation>) {
        self.relation = relation;
        if relation != Some(Relation::Agent) {
            self.agency_name.clear();
            self.agency_address.clear();
            self.agent_ref.clear();
        }
        if relation != Some(Relation::Other) {
            self.relation_other.clear();
        }
    }

    /// Changes the security result. Selecting a new result starts from an
    /// empty reason set; re-selecting the current result keeps the reasons
    /// already ticked.
    pub fn set_security_result(&mut self, result: Option<SecurityResult>) {
        if self.security.result() == result {
            return;
        }
        self.security = match result {
            Some(SecurityResult::Pass) => SecurityOutcome::Pass(BTreeSet::new()),
            Some(SecurityResult::Fail) => SecurityOutcome::Fail(BTreeSet::new()),
            None => SecurityOutcome::Unset,
        };
    }

    /// Flips one pass reason. A no-op unless the outcome is currently Pass,
    /// which keeps the variant and its reasons structurally in step.
    pub fn toggle_pass_reason(&mut self, reason: PassReason) {
        if let SecurityOutcome::Pass(reasons) = &mut self.security {
            if !reasons.remove(&reason) {
                reasons.insert(reason);
            }
        }
    }

    /// Flips one fail reason; no-op unless the outcome is currently Fail.
    pub fn toggle_fail_reason(&mut self, reason: FailReason) {
        if let SecurityOutcome::Fail(reasons) = &mut self.security {
            if !reasons.remove(&reason) {
                reasons.insert(reason);
            }
        }
    }

    pub fn agent_fields_visible(&self) -> bool {
        self.relation == Some(Relation::Agent)
    }

    pub fn other_field_visible(&self) -> bool {
        self.relation == Some(Relation::Other)
    }

    /// Relationship as rendered in notes: "Other — <text>" for a qualified
    /// Other, the plain variant label otherwise, "N/A" when unset.
    pub fn relation_label(&self) -> String {
        match self.relation {
            None => "N/A".to_string(),
            Some(Relation::Other) => {
                let detail = self.relation_other.trim();
                if detail.is_empty() {
                    "Other".to_string()
                } else {
                    format!("Other — {detail}")
                }
            }
            Some(relation) => relation.label().to_string(),
        }
    }

    /// Seeds or extends the brief from the static template catalog. An
    /// unknown topic is a caller bug, not a user error: it is ignored, but
    /// logged so it stays observable.
    pub fn insert_brief_template(&mut self, settings: &Settings, topic: &str, append: bool) {
        let Some(body) = templates::template_body(topic) else {
            tracing::debug!(topic, "ignoring unknown brief template topic");
            return;
        };

        let mut segments = vec![body.to_string()];
        if let Some(context) = templates::context_line(self, settings) {
            segments.push(context);
        }
        segments.push("Actions taken: ".to_string());
        let text = segments
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if append && !self.brief.trim().is_empty() {
            self.brief = format!("{}\n\n{text}", self.brief);
        } else {
            self.brief = text;
        }
        self.selected_template = Some(topic.to_string());
    }

    /// Clears every call-scoped field back to its default. Settings are
    /// explicitly excluded. Idempotent.
    pub fn reset(&mut self) {
        *self = CallFormState::default();
    }

    /// Re-applies the transition rules to a snapshot that arrived from
    /// outside (e.g. a JSON file), so invariants hold and every free-text
    /// field is stored trimmed.
    pub fn normalize(&mut self) {
        self.set_relation(self.relation);
        for field in [
            FieldId::Vrn,
            FieldId::BusinessName,
            FieldId::AddressLine,
            FieldId::Postcode,
            FieldId::CallerName,
            FieldId::PhoneNumber,
            FieldId::RelationOther,
            FieldId::AgencyName,
            FieldId::AgencyAddress,
            FieldId::AgentRef,
            FieldId::Brief,
        ] {
            let value = self.field(field).trim().to_string();
            *self.field_mut(field) = value;
        }
    }

    /// Single dispatch point for UI events. Reference bumps and template
    /// context read the persisted settings, so they are passed in alongside.
    pub fn apply(&mut self, settings: &mut Settings, command: FormCommand) {
        match command {
            FormCommand::SetField { field, value } => self.set_field(field, &value),
            FormCommand::SetRelation(relation) => self.set_relation(relation),
            FormCommand::SetSecurityResult(result) => self.set_security_result(result),
            FormCommand::TogglePassReason(reason) => self.toggle_pass_reason(reason),
            FormCommand::ToggleFailReason(reason) => self.toggle_fail_reason(reason),
            FormCommand::BumpReferenceNumber(delta) => settings.bump_reference_number(delta),
            FormCommand::InsertBriefTemplate { topic, append } => {
                self.insert_brief_template(settings, &topic, append)
            }
            FormCommand::ResetCall => self.reset(),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
