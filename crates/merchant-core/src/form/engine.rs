//! # Per-Entry Validation Engine
//!
//! Maps (field, new value, entry) to a set/clear instruction for that
//! entry's errors. Stateless: the container owns the entries and applies
//! the outcome.
//!
//! ## Rule Table
//! ```text
//! ┌──────────────────────┬──────────┬─────────────────────────────────────┐
//! │ Field                │ Trigger  │ Rule                                │
//! ├──────────────────────┼──────────┼─────────────────────────────────────┤
//! │ franchiseName        │ change   │ blank → Campo obbligatorio          │
//! │ contactName/Surname  │ change   │ blank → Campo obbligatorio          │
//! │ address              │ change   │ blank → Campo obbligatorio          │
//! │ city/zip/region/prov │ change   │ blank → " "                         │
//! │ website              │ change   │ ONLINE: required + https url        │
//! │                      │          │ PHYSICAL: optional https url        │
//! │ channelGeolink       │ change   │ optional http url                   │
//! │ channelWebsite       │ change   │ optional https url                  │
//! │ contactEmail         │ change   │ email format; re-checks confirm     │
//! │ confirmContactEmail  │ change   │ email format, then must match       │
//! │ channelPhone         │ blur     │ 7..=15 chars when present           │
//! │ channelEmail         │ blur     │ email format when present           │
//! │ type                 │ -        │ never validated here                │
//! └──────────────────────┴──────────┴─────────────────────────────────────┘
//! ```

use crate::form::errors::FieldErrors;
use crate::types::{PointOfSaleEntry, PosField, SalesPointType};
use crate::validation::{
    is_blank, is_valid_email, is_valid_phone, is_valid_url, normalize_url,
    MSG_ADDRESS_PART_MISSING, MSG_EMAIL_MISMATCH, MSG_INVALID_EMAIL, MSG_INVALID_PHONE,
    MSG_INVALID_WEBSITE, MSG_REQUIRED,
};

/// What caused the validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTrigger {
    Change,
    Blur,
}

/// Validation-only state kept next to an entry but never emitted with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationShadow {
    /// Second copy of the contact email, typed by the user to confirm.
    pub confirm_contact_email: String,
}

/// Errors to record and errors to drop for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOutcome {
    pub errors_to_set: FieldErrors,
    pub errors_to_clear: Vec<PosField>,
}

impl FieldOutcome {
    fn set(mut self, field: PosField, message: &str) -> Self {
        self.errors_to_set.insert(field, message.to_string());
        self
    }

    fn clear(mut self, field: PosField) -> Self {
        self.errors_to_clear.push(field);
        self
    }

    fn check(self, field: PosField, failure: Option<&str>) -> Self {
        match failure {
            Some(message) => self.set(field, message),
            None => self.clear(field),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors_to_set.is_empty() && self.errors_to_clear.is_empty()
    }

    /// Applies clears first, then sets.
    pub fn apply_to(&self, errors: &mut FieldErrors) {
        for field in &self.errors_to_clear {
            errors.remove(field);
        }
        for (field, message) in &self.errors_to_set {
            errors.insert(*field, message.clone());
        }
    }
}

fn optional_url(value: &str, scheme: &str) -> Option<&'static str> {
    if is_blank(value) || is_valid_url(&normalize_url(value, scheme)) {
        None
    } else {
        Some(MSG_INVALID_WEBSITE)
    }
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    is_blank(value).then_some(message)
}

/// Runs the rule for `field` against its new `value`.
///
/// `entry` is the entry as it was before the change; cross-field checks
/// read the other side from it (or from `shadow` for the confirm email).
pub fn validate_field(
    entry: &PointOfSaleEntry,
    shadow: &ValidationShadow,
    field: PosField,
    value: &str,
    trigger: FieldTrigger,
) -> FieldOutcome {
    let outcome = FieldOutcome::default();

    match (field, trigger) {
        (PosField::Type, _) => outcome,

        (PosField::ChannelPhone, FieldTrigger::Blur) => {
            let failure = (!is_valid_phone(value)).then_some(MSG_INVALID_PHONE);
            outcome.check(field, failure)
        }
        (PosField::ChannelEmail, FieldTrigger::Blur) => {
            let failure = (!is_blank(value) && !is_valid_email(value)).then_some(MSG_INVALID_EMAIL);
            outcome.check(field, failure)
        }
        // Everything else only reacts to changes.
        (_, FieldTrigger::Blur) => outcome,
        (PosField::ChannelPhone | PosField::ChannelEmail, FieldTrigger::Change) => outcome,

        (PosField::ChannelGeolink, _) => outcome.check(field, optional_url(value, "http")),
        (PosField::ChannelWebsite, _) => outcome.check(field, optional_url(value, "https")),

        (PosField::Website, _) => {
            let failure = match entry.sales_point_type {
                SalesPointType::Online if is_blank(value) => Some(MSG_REQUIRED),
                _ => optional_url(value, "https"),
            };
            outcome.check(field, failure)
        }

        (PosField::ContactEmail, _) => {
            let failure = (!is_valid_email(value)).then_some(MSG_INVALID_EMAIL);
            let outcome = outcome.check(field, failure);

            let confirm = &shadow.confirm_contact_email;
            if confirm.is_empty() {
                outcome
            } else if confirm.trim() != value.trim() {
                outcome.set(PosField::ConfirmContactEmail, MSG_EMAIL_MISMATCH)
            } else {
                outcome.clear(PosField::ConfirmContactEmail)
            }
        }

        (PosField::ConfirmContactEmail, _) => {
            let failure = if !is_valid_email(value) {
                Some(MSG_INVALID_EMAIL)
            } else if !entry.contact_email.is_empty()
                && entry.contact_email.trim() != value.trim()
            {
                Some(MSG_EMAIL_MISMATCH)
            } else {
                None
            };
            outcome.check(field, failure)
        }

        (
            PosField::FranchiseName
            | PosField::ContactName
            | PosField::ContactSurname
            | PosField::Address,
            _,
        ) => outcome.check(field, required(value, MSG_REQUIRED)),

        (PosField::City | PosField::ZipCode | PosField::Region | PosField::Province, _) => {
            outcome.check(field, required(value, MSG_ADDRESS_PART_MISSING))
        }
    }
}

/// Fields that must be filled before an entry of this type can be sent.
pub fn required_fields(sales_point_type: SalesPointType) -> &'static [PosField] {
    match sales_point_type {
        SalesPointType::Physical => &[
            PosField::FranchiseName,
            PosField::Address,
            PosField::City,
            PosField::ZipCode,
            PosField::Region,
            PosField::Province,
            PosField::ContactName,
            PosField::ContactSurname,
            PosField::ContactEmail,
            PosField::ConfirmContactEmail,
        ],
        SalesPointType::Online => &[
            PosField::FranchiseName,
            PosField::Website,
            PosField::ContactName,
            PosField::ContactSurname,
            PosField::ContactEmail,
            PosField::ConfirmContactEmail,
        ],
    }
}

/// Required fields still blank for this entry.
///
/// Read-only: the parent uses it to decide submit eligibility, the error
/// map is left untouched.
pub fn missing_required_fields(
    entry: &PointOfSaleEntry,
    shadow: &ValidationShadow,
) -> Vec<PosField> {
    required_fields(entry.sales_point_type)
        .iter()
        .copied()
        .filter(|field| {
            let value = match field {
                PosField::ConfirmContactEmail => shadow.confirm_contact_email.as_str(),
                other => entry.value(*other).unwrap_or_default(),
            };
            is_blank(value)
        })
        .collect()
}
