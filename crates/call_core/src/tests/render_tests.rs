use super::*;
use crate::{CallFormState, FieldId};
use shared::domain::{FailReason, NoteTarget, PassReason, Relation, SecurityResult};

fn populated_state() -> CallFormState {
    let mut state = CallFormState::default();
    state.set_field(FieldId::Vrn, "123456789");
    state.set_field(FieldId::BusinessName, "Acme Widgets Ltd");
    state.set_field(FieldId::AddressLine, "1 High Street");
    state.set_field(FieldId::Postcode, "AB1 2CD");
    state.set_field(FieldId::CallerName, "Jane Doe");
    state.set_field(FieldId::PhoneNumber, "01632 960000");
    state.set_relation(Some(Relation::Agent));
    state.set_field(FieldId::AgencyName, "Acme Tax");
    state.set_field(FieldId::AgencyAddress, "2 Low Road");
    state.set_field(FieldId::AgentRef, "AR-9");
    state.set_security_result(Some(SecurityResult::Pass));
    state.toggle_pass_reason(PassReason::Edr);
    state.set_field(FieldId::Brief, "Caller asked about a repayment.");
    state
}

fn populated_settings() -> Settings {
    Settings {
        officer_name: "Dana Iqbal".to_string(),
        reference_prefix: "CCEL-".to_string(),
        reference_number: "1042".to_string(),
        webchat_id: "WC-77".to_string(),
        include_webchat_id: true,
        aui_ext: "4411".to_string(),
        include_aui_ext: true,
    }
}

#[test]
fn security_line_unset_renders_na() {
    assert_eq!(
        render_security_line(&SecurityOutcome::Unset),
        "Security: N/A"
    );
}

#[test]
fn security_line_without_reasons_has_no_details_suffix() {
    let mut state = CallFormState::default();
    state.set_security_result(Some(SecurityResult::Pass));
    assert_eq!(render_security_line(&state.security), "Security: Pass");
}

#[test]
fn security_line_orders_details_by_catalog_not_click_order() {
    let mut state = CallFormState::default();
    state.set_security_result(Some(SecurityResult::Pass));
    state.toggle_pass_reason(PassReason::Arn);
    state.toggle_pass_reason(PassReason::Edr);
    assert_eq!(
        render_security_line(&state.security),
        "Security: Pass (details: PASSED EDR confirmed; PASSED ARN confirmed)"
    );
}

#[test]
fn security_line_renders_fail_details() {
    let mut state = CallFormState::default();
    state.set_security_result(Some(SecurityResult::Fail));
    state.toggle_fail_reason(FailReason::AgentNotAuthorised);
    state.toggle_fail_reason(FailReason::BoxFive);
    assert_eq!(
        render_security_line(&state.security),
        "Security: Fail (details: FAILED unable to confirm box 5 figure; FAILED agent not authorised)"
    );
}

#[test]
fn empty_primary_note_still_carries_disclaimer_and_security() {
    let note = render_primary_note(&CallFormState::default(), &Settings::default());
    assert_eq!(
        note,
        "All calls are digitally recorded.\n\
         To request a copy of this call please email DL-CC Head Office Quality.\n\
         \n\
         Officer: —\n\
         CCEL Ref: N/A\n\
         VRN: N/A\n\
         Business Name: —\n\
         Address: —\n\
         Caller Name: —\n\
         Relationship: N/A\n\
         Phone number: —\n\
         Security: N/A\n\
         \n\
         Brief — What they wanted / What you did:\n\
         —"
    );
}

#[test]
fn empty_secondary_note_still_carries_disclaimer_and_security() {
    let note = render_secondary_note(&CallFormState::default(), &Settings::default());
    assert_eq!(
        note,
        "All calls are digitally recorded.\n\
         To request a copy of this call please email DL-CC Head Office Quality.\n\
         \n\
         VRN: N/A | CCEL: N/A\n\
         Business: — | Postcode: —\n\
         Name: — (N/A)\n\
         Phone: —\n\
         Security: N/A\n\
         \n\
         Brief:\n\
         —"
    );
}

#[test]
fn populated_primary_note_renders_every_line_in_order() {
    let note = render_primary_note(&populated_state(), &populated_settings());
    assert_eq!(
        note,
        "All calls are digitally recorded.\n\
         To request a copy of this call please email DL-CC Head Office Quality.\n\
         \n\
         Officer: Dana Iqbal\n\
         Webchat ID: WC-77\n\
         AUI Ext: 4411\n\
         CCEL Ref: CCEL-1042\n\
         VRN: 123456789\n\
         Business Name: Acme Widgets Ltd\n\
         Address: 1 High Street AB1 2CD\n\
         Caller Name: Jane Doe\n\
         Relationship: Agent\n\
         Agency: Acme Tax | 2 Low Road\n\
         Agent Ref: AR-9\n\
         Phone number: 01632 960000\n\
         Security: Pass (details: PASSED EDR confirmed)\n\
         \n\
         Brief — What they wanted / What you did:\n\
         Caller asked about a repayment."
    );
}

#[test]
fn populated_secondary_note_renders_compact_layout() {
    let note = render_secondary_note(&populated_state(), &populated_settings());
    assert_eq!(
        note,
        "All calls are digitally recorded.\n\
         To request a copy of this call please email DL-CC Head Office Quality.\n\
         \n\
         Webchat ID: WC-77\n\
         AUI Ext: 4411\n\
         VRN: 123456789 | CCEL: CCEL-1042\n\
         Business: Acme Widgets Ltd | Postcode: AB1 2CD\n\
         Name: Jane Doe (Agent)\n\
         Agency: Acme Tax | 2 Low Road\n\
         Agent Ref: AR-9\n\
         Phone: 01632 960000\n\
         Security: Pass (details: PASSED EDR confirmed)\n\
         \n\
         Brief:\n\
         Caller asked about a repayment."
    );
}

#[test]
fn leaving_agent_relation_removes_agency_lines_from_notes() {
    let mut state = populated_state();
    state.set_relation(Some(Relation::Caller));

    let note = render_primary_note(&state, &populated_settings());
    assert!(!note.contains("Agency:"));
    assert!(!note.contains("Agent Ref:"));
    assert!(note.contains("Relationship: Caller"));
}

#[test]
fn identifier_lines_require_flag_and_value() {
    let mut settings = populated_settings();
    settings.include_webchat_id = false;
    settings.aui_ext = String::new();

    let note = render_primary_note(&CallFormState::default(), &settings);
    assert!(!note.contains("Webchat ID:"));
    assert!(!note.contains("AUI Ext:"));
}

#[test]
fn other_relation_renders_qualified_label() {
    let mut state = CallFormState::default();
    state.set_relation(Some(Relation::Other));
    state.set_field(FieldId::RelationOther, "Bookkeeper");

    let note = render_primary_note(&state, &Settings::default());
    assert!(note.contains("Relationship: Other — Bookkeeper"));

    state.set_field(FieldId::RelationOther, "");
    let note = render_primary_note(&state, &Settings::default());
    assert!(note.contains("Relationship: Other\n"));
}

#[test]
fn render_note_selects_target() {
    let state = populated_state();
    let settings = populated_settings();
    assert_eq!(
        render_note(NoteTarget::Ccel, &state, &settings),
        render_primary_note(&state, &settings)
    );
    assert_eq!(
        render_note(NoteTarget::Aui, &state, &settings),
        render_secondary_note(&state, &settings)
    );
}

#[test]
fn rendering_is_independent_of_transition_order() {
    let settings = populated_settings();

    let mut forward = CallFormState::default();
    forward.set_field(FieldId::Vrn, "123456789");
    forward.set_relation(Some(Relation::Agent));
    forward.set_field(FieldId::AgencyName, "Acme Tax");
    forward.set_security_result(Some(SecurityResult::Pass));
    forward.toggle_pass_reason(PassReason::Edr);
    forward.toggle_pass_reason(PassReason::Arn);

    let mut reordered = CallFormState::default();
    reordered.set_security_result(Some(SecurityResult::Fail));
    reordered.set_security_result(Some(SecurityResult::Pass));
    reordered.toggle_pass_reason(PassReason::Arn);
    reordered.toggle_pass_reason(PassReason::Edr);
    reordered.set_relation(Some(Relation::Other));
    reordered.set_field(FieldId::RelationOther, "scrapped");
    reordered.set_relation(Some(Relation::Agent));
    reordered.set_field(FieldId::AgencyName, "Acme Tax");
    reordered.set_field(FieldId::Vrn, "123456789");

    assert_eq!(forward, reordered);
    assert_eq!(
        render_primary_note(&forward, &settings),
        render_primary_note(&reordered, &settings)
    );
    assert_eq!(
        render_secondary_note(&forward, &settings),
        render_secondary_note(&reordered, &settings)
    );
}
