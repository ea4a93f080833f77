use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Relationship of the person on the phone to the VAT account.
///
/// Only `Agent` and `Other` drive conditional form fields; the remaining
/// variants are plain labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Caller,
    Agent,
    Employee,
    Other,
}

impl Relation {
    pub fn label(self) -> &'static str {
        match self {
            Relation::Caller => "Caller",
            Relation::Agent => "Agent",
            Relation::Employee => "Employee",
            Relation::Other => "Other",
        }
    }
}

/// Outcome of the identity-verification check, as selected on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityResult {
    Pass,
    Fail,
}

/// Reasons a caller passed security. Declaration order is the render order
/// in note output, independent of the order boxes were ticked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassReason {
    BoxFive,
    Edr,
    Arn,
    Form648,
    AgentOtherAnswers,
    Eis,
}

impl PassReason {
    pub const ALL: [PassReason; 6] = [
        PassReason::BoxFive,
        PassReason::Edr,
        PassReason::Arn,
        PassReason::Form648,
        PassReason::AgentOtherAnswers,
        PassReason::Eis,
    ];

    /// Exact wording pasted into downstream case systems. Downstream text
    /// parsers match on these strings; do not reword.
    pub fn phrase(self) -> &'static str {
        match self {
            PassReason::BoxFive => "PASSED box five figure confirmed",
            PassReason::Edr => "PASSED EDR confirmed",
            PassReason::Arn => "PASSED ARN confirmed",
            PassReason::Form648 => "PASSED via VAT form 64-8",
            PassReason::AgentOtherAnswers => {
                "PASSED agent unable to confirm ARN but confirmed answers to other account questions"
            }
            PassReason::Eis => "PASSED via EIS reference",
        }
    }

    pub fn checkbox_label(self) -> &'static str {
        match self {
            PassReason::BoxFive => "Box 5 figure confirmed",
            PassReason::Edr => "EDR confirmed",
            PassReason::Arn => "ARN confirmed",
            PassReason::Form648 => "VAT form 64-8 held",
            PassReason::AgentOtherAnswers => "Agent answered other account questions",
            PassReason::Eis => "EIS reference confirmed",
        }
    }
}

/// Reasons a caller failed security. Declaration order is the render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    BoxFive,
    Edr,
    Vrn,
    AgentNotAuthorised,
    NotAuthorised,
    AgentRefOther,
}

impl FailReason {
    pub const ALL: [FailReason; 6] = [
        FailReason::BoxFive,
        FailReason::Edr,
        FailReason::Vrn,
        FailReason::AgentNotAuthorised,
        FailReason::NotAuthorised,
        FailReason::AgentRefOther,
    ];

    /// Exact wording pasted into downstream case systems; see
    /// [`PassReason::phrase`].
    pub fn phrase(self) -> &'static str {
        match self {
            FailReason::BoxFive => "FAILED unable to confirm box 5 figure",
            FailReason::Edr => "FAILED unable to confirm EDR",
            FailReason::Vrn => "FAILED unable to confirm VRN",
            FailReason::AgentNotAuthorised => "FAILED agent not authorised",
            FailReason::NotAuthorised => "FAILED not authorised",
            FailReason::AgentRefOther => {
                "FAILED agent unable to confirm agent ref or answer other account questions"
            }
        }
    }

    pub fn checkbox_label(self) -> &'static str {
        match self {
            FailReason::BoxFive => "Unable to confirm box 5 figure",
            FailReason::Edr => "Unable to confirm EDR",
            FailReason::Vrn => "Unable to confirm VRN",
            FailReason::AgentNotAuthorised => "Agent not authorised",
            FailReason::NotAuthorised => "Not authorised",
            FailReason::AgentRefOther => "Agent unable to confirm agent ref or other answers",
        }
    }
}

/// Security-check state carried by the form.
///
/// Modelled as a tagged enum so that pass reasons and fail reasons can never
/// coexist: switching the result replaces the whole variant, reasons
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result", content = "reasons")]
pub enum SecurityOutcome {
    #[default]
    Unset,
    Pass(BTreeSet<PassReason>),
    Fail(BTreeSet<FailReason>),
}

impl SecurityOutcome {
    pub fn result(&self) -> Option<SecurityResult> {
        match self {
            SecurityOutcome::Unset => None,
            SecurityOutcome::Pass(_) => Some(SecurityResult::Pass),
            SecurityOutcome::Fail(_) => Some(SecurityResult::Fail),
        }
    }

    /// Two-state visual indicator: `Ok` only for a pass, `Warn` for a fail
    /// and for an unset check alike.
    pub fn indicator(&self) -> SecurityIndicator {
        match self {
            SecurityOutcome::Pass(_) => SecurityIndicator::Ok,
            _ => SecurityIndicator::Warn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityIndicator {
    Ok,
    Warn,
}

/// The two downstream systems a rendered note targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteTarget {
    /// The primary case-log ("CCEL") note.
    Ccel,
    /// The compact secondary ("AUI"/SAP) note.
    Aui,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_phrases_are_verbatim_contract() {
        assert_eq!(
            PassReason::BoxFive.phrase(),
            "PASSED box five figure confirmed"
        );
        assert_eq!(PassReason::Edr.phrase(), "PASSED EDR confirmed");
        assert_eq!(PassReason::Arn.phrase(), "PASSED ARN confirmed");
        assert_eq!(PassReason::Form648.phrase(), "PASSED via VAT form 64-8");
        assert_eq!(
            PassReason::AgentOtherAnswers.phrase(),
            "PASSED agent unable to confirm ARN but confirmed answers to other account questions"
        );
        assert_eq!(PassReason::Eis.phrase(), "PASSED via EIS reference");
    }

    #[test]
    fn fail_phrases_are_verbatim_contract() {
        assert_eq!(
            FailReason::BoxFive.phrase(),
            "FAILED unable to confirm box 5 figure"
        );
        assert_eq!(FailReason::Edr.phrase(), "FAILED unable to confirm EDR");
        assert_eq!(FailReason::Vrn.phrase(), "FAILED unable to confirm VRN");
        assert_eq!(
            FailReason::AgentNotAuthorised.phrase(),
            "FAILED agent not authorised"
        );
        assert_eq!(FailReason::NotAuthorised.phrase(), "FAILED not authorised");
        assert_eq!(
            FailReason::AgentRefOther.phrase(),
            "FAILED agent unable to confirm agent ref or answer other account questions"
        );
    }

    #[test]
    fn reason_ordering_follows_declaration_order() {
        let mut reasons = BTreeSet::new();
        reasons.insert(PassReason::Eis);
        reasons.insert(PassReason::BoxFive);
        reasons.insert(PassReason::Arn);
        let ordered: Vec<_> = reasons.into_iter().collect();
        assert_eq!(
            ordered,
            vec![PassReason::BoxFive, PassReason::Arn, PassReason::Eis]
        );
    }

    #[test]
    fn security_outcome_serde_round_trips() {
        let outcome: SecurityOutcome =
            SecurityOutcome::Pass([PassReason::Edr, PassReason::Arn].into_iter().collect());
        let json = serde_json::to_string(&outcome).expect("serialize");
        let back: SecurityOutcome = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(outcome, back);
    }

    #[test]
    fn indicator_has_no_third_state() {
        assert_eq!(SecurityOutcome::Unset.indicator(), SecurityIndicator::Warn);
        assert_eq!(
            SecurityOutcome::Fail(BTreeSet::new()).indicator(),
            SecurityIndicator::Warn
        );
        assert_eq!(
            SecurityOutcome::Pass(BTreeSet::new()).indicator(),
            SecurityIndicator::Ok
        );
    }
}
