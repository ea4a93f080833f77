//! Pure note rendering.
//!
//! Wording and line order are a compatibility contract: the output is
//! pasted verbatim into downstream case systems and both humans and text
//! parsers rely on the exact phrasing, notably the security-reason phrases.
//! Rendering is a pure function of (state, settings); identical inputs
//! produce byte-identical notes.

use shared::domain::{NoteTarget, SecurityOutcome};

use crate::{settings::Settings, CallFormState};

/// Fixed two-line recording disclaimer; every note starts with it.
const RECORDING_DISCLAIMER: [&str; 2] = [
    "All calls are digitally recorded.",
    "To request a copy of this call please email DL-CC Head Office Quality.",
];

/// Fallback for free-text identity fields.
const FALLBACK_TEXT: &str = "—";
/// Fallback for reference-like fields (VRN, case reference, relationship).
const FALLBACK_REF: &str = "N/A";

fn or_dash(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        FALLBACK_TEXT
    } else {
        trimmed
    }
}

fn or_na(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        FALLBACK_REF
    } else {
        trimmed
    }
}

/// Joins the non-empty parts with `separator`; the em-dash fallback applies
/// only when every part is blank.
fn joined_or_dash(parts: &[&str], separator: &str) -> String {
    let joined = parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator);
    if joined.is_empty() {
        FALLBACK_TEXT.to_string()
    } else {
        joined
    }
}

/// The "Security: ..." line shared by both notes.
///
/// Reasons render in catalog declaration order, never in the order they
/// were ticked.
pub fn render_security_line(outcome: &SecurityOutcome) -> String {
    match outcome {
        SecurityOutcome::Unset => format!("Security: {FALLBACK_REF}"),
        SecurityOutcome::Pass(reasons) => {
            security_line("Pass", reasons.iter().map(|reason| reason.phrase()))
        }
        SecurityOutcome::Fail(reasons) => {
            security_line("Fail", reasons.iter().map(|reason| reason.phrase()))
        }
    }
}

fn security_line<'a>(result: &str, phrases: impl Iterator<Item = &'a str>) -> String {
    let details = phrases.collect::<Vec<_>>().join("; ");
    if details.is_empty() {
        format!("Security: {result}")
    } else {
        format!("Security: {result} (details: {details})")
    }
}

pub fn render_note(target: NoteTarget, state: &CallFormState, settings: &Settings) -> String {
    match target {
        NoteTarget::Ccel => render_primary_note(state, settings),
        NoteTarget::Aui => render_secondary_note(state, settings),
    }
}

/// The primary case-log (CCEL) note.
pub fn render_primary_note(state: &CallFormState, settings: &Settings) -> String {
    let reference = settings.composed_reference();
    let mut lines: Vec<String> = Vec::new();
    lines.push(RECORDING_DISCLAIMER[0].to_string());
    lines.push(RECORDING_DISCLAIMER[1].to_string());
    lines.push(String::new());
    lines.push(format!("Officer: {}", or_dash(&settings.officer_name)));
    push_identifier_lines(&mut lines, settings);
    lines.push(format!("CCEL Ref: {}", or_na(&reference)));
    lines.push(format!("VRN: {}", or_na(&state.vrn)));
    lines.push(format!("Business Name: {}", or_dash(&state.business_name)));
    lines.push(format!(
        "Address: {}",
        joined_or_dash(&[&state.address_line, &state.postcode], " ")
    ));
    lines.push(format!("Caller Name: {}", or_dash(&state.caller_name)));
    lines.push(format!("Relationship: {}", state.relation_label()));
    if state.agent_fields_visible() {
        lines.push(format!(
            "Agency: {}",
            joined_or_dash(&[&state.agency_name, &state.agency_address], " | ")
        ));
        lines.push(format!("Agent Ref: {}", or_dash(&state.agent_ref)));
    }
    lines.push(format!("Phone number: {}", or_dash(&state.phone_number)));
    lines.push(render_security_line(&state.security));
    lines.push(String::new());
    lines.push("Brief — What they wanted / What you did:".to_string());
    lines.push(or_dash(&state.brief).to_string());
    lines.join("\n")
}

/// The compact secondary (AUI/SAP) note.
pub fn render_secondary_note(state: &CallFormState, settings: &Settings) -> String {
    let reference = settings.composed_reference();
    let mut lines: Vec<String> = Vec::new();
    lines.push(RECORDING_DISCLAIMER[0].to_string());
    lines.push(RECORDING_DISCLAIMER[1].to_string());
    lines.push(String::new());
    push_identifier_lines(&mut lines, settings);
    lines.push(format!(
        "VRN: {} | CCEL: {}",
        or_na(&state.vrn),
        or_na(&reference)
    ));
    lines.push(format!(
        "Business: {} | Postcode: {}",
        or_dash(&state.business_name),
        or_dash(&state.postcode)
    ));
    lines.push(format!(
        "Name: {} ({})",
        or_dash(&state.caller_name),
        state.relation_label()
    ));
    if state.agent_fields_visible() {
        lines.push(format!(
            "Agency: {}",
            joined_or_dash(&[&state.agency_name, &state.agency_address], " | ")
        ));
        lines.push(format!("Agent Ref: {}", or_dash(&state.agent_ref)));
    }
    lines.push(format!("Phone: {}", or_dash(&state.phone_number)));
    lines.push(render_security_line(&state.security));
    lines.push(String::new());
    lines.push("Brief:".to_string());
    lines.push(or_dash(&state.brief).to_string());
    lines.join("\n")
}

/// Optional identifier lines appear only when their include flag is on AND
/// the value is non-empty.
fn push_identifier_lines(lines: &mut Vec<String>, settings: &Settings) {
    if settings.include_webchat_id && !settings.webchat_id.trim().is_empty() {
        lines.push(format!("Webchat ID: {}", settings.webchat_id.trim()));
    }
    if settings.include_aui_ext && !settings.aui_ext.trim().is_empty() {
        lines.push(format!("AUI Ext: {}", settings.aui_ext.trim()));
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
