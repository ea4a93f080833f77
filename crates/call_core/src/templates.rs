//! Static brief-template catalog for common contact reasons.
//!
//! Read-only at runtime. Inserting a template seeds the brief with the
//! canned narrative, a context line built from whatever identifying fields
//! are already populated, and an "Actions taken: " stub for the officer to
//! finish.

use crate::{settings::Settings, CallFormState};

pub struct BriefTemplate {
    pub topic: &'static str,
    pub body: &'static str,
}

pub const BRIEF_TEMPLATES: [BriefTemplate; 20] = [
    BriefTemplate {
        topic: "Registration",
        body: "Caller chased progress of a VAT registration application. Confirmed receipt of the application and advised of the current processing timescale.",
    },
    BriefTemplate {
        topic: "Deregistration",
        body: "Caller asked to cancel their VAT registration. Explained the deregistration criteria, how to apply online and when the final return will be due.",
    },
    BriefTemplate {
        topic: "Return filing",
        body: "Caller needed help submitting an outstanding VAT return. Talked through the online filing steps and confirmed which periods are outstanding.",
    },
    BriefTemplate {
        topic: "Payment",
        body: "Caller wanted to pay an outstanding VAT balance. Confirmed the amount due and the payment options, and gave the payment reference to quote.",
    },
    BriefTemplate {
        topic: "Repayment",
        body: "Caller chased a pending VAT repayment. Checked the repayment status and advised of the expected release date and the bank details held.",
    },
    BriefTemplate {
        topic: "Direct Debit",
        body: "Caller asked about paying by Direct Debit. Explained how to set up the mandate online and when collections are taken after the return due date.",
    },
    BriefTemplate {
        topic: "Address change",
        body: "Caller reported a change of principal place of business. Advised how to update the address online and confirmed which records the change applies to.",
    },
    BriefTemplate {
        topic: "Bank details change",
        body: "Caller asked to change the bank details used for repayments. Advised the change must be made through the online account and what checks may follow.",
    },
    BriefTemplate {
        topic: "Agent authorisation",
        body: "Agent asked about authorisation to act for the business. Explained the form 64-8 and digital handshake routes and what an authorised agent can access.",
    },
    BriefTemplate {
        topic: "Penalty",
        body: "Caller queried a penalty charged to the account. Explained how the penalty was calculated and the options to appeal or request a review.",
    },
    BriefTemplate {
        topic: "Surcharge",
        body: "Caller queried a default surcharge on the account. Explained the surcharge period rules and the effect of further defaults.",
    },
    BriefTemplate {
        topic: "Error correction",
        body: "Caller reported an error on a submitted return. Advised of the correction threshold and how to notify the error correction team where it is exceeded.",
    },
    BriefTemplate {
        topic: "VAT certificate",
        body: "Caller requested a copy of their VAT registration certificate. Advised how to view and print the certificate from the online account.",
    },
    BriefTemplate {
        topic: "Making Tax Digital",
        body: "Caller asked about Making Tax Digital requirements. Explained the sign-up steps and the need for compatible software before the next return.",
    },
    BriefTemplate {
        topic: "Flat Rate Scheme",
        body: "Caller asked about joining the Flat Rate Scheme. Explained the eligibility conditions and how the flat rate percentage applies to turnover.",
    },
    BriefTemplate {
        topic: "EORI",
        body: "Caller asked about an EORI number for moving goods. Confirmed whether one is already linked to the VAT registration and how to apply if not.",
    },
    BriefTemplate {
        topic: "Group registration",
        body: "Caller asked about VAT group registration. Explained the eligibility rules and the forms required to create or amend a group.",
    },
    BriefTemplate {
        topic: "Insolvency",
        body: "Caller advised the business has entered an insolvency procedure. Recorded the insolvency details and advised which team will manage the account.",
    },
    BriefTemplate {
        topic: "Time to pay",
        body: "Caller asked to spread payment of an outstanding balance. Discussed affordability and referred to the payment support service for an arrangement.",
    },
    BriefTemplate {
        topic: "General enquiry",
        body: "General VAT account enquiry. Provided the requested information from the account and signposted the relevant online guidance.",
    },
];

pub fn template_body(topic: &str) -> Option<&'static str> {
    BRIEF_TEMPLATES
        .iter()
        .find(|template| template.topic == topic)
        .map(|template| template.body)
}

pub fn topics() -> impl Iterator<Item = &'static str> {
    BRIEF_TEMPLATES.iter().map(|template| template.topic)
}

/// Builds the "Context: ..." line from the identifying fields that are
/// populated right now, joined by " | ". Returns `None` when nothing
/// identifying has been entered yet.
pub(crate) fn context_line(state: &CallFormState, settings: &Settings) -> Option<String> {
    let mut parts = Vec::new();

    let vrn = state.vrn.trim();
    if !vrn.is_empty() {
        parts.push(format!("VRN: {vrn}"));
    }
    let reference = settings.composed_reference();
    if !reference.is_empty() {
        parts.push(format!("CCEL Ref: {reference}"));
    }
    let business = state.business_name.trim();
    if !business.is_empty() {
        parts.push(format!("Business: {business}"));
    }
    let caller = state.caller_name.trim();
    if !caller.is_empty() {
        if state.relation.is_some() {
            parts.push(format!("Caller: {caller} ({})", state.relation_label()));
        } else {
            parts.push(format!("Caller: {caller}"));
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("Context: {}", parts.join(" | ")))
    }
}
