//! Record validation.
//!
//! Two layers are checked. Form-level [`rules`] run while a draft is edited
//! and report a message per failing field. The structural [`schema`] check
//! runs before anything is written and only says whether the record has the
//! shape of a [`crate::domain::User`].

pub mod rules;
pub mod schema;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::UserDraft;

pub use rules::{Field, FieldRule, USER_RULES};

/// Result of validating a candidate record.
///
/// Always a pure projection of the candidate it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: BTreeMap<Field, &'static str>,
    schema_error: Option<&'static str>,
}

impl ValidationOutcome {
    fn schema_invalid() -> Self {
        Self {
            errors: BTreeMap::new(),
            schema_error: Some(schema::SCHEMA_MESSAGE),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.schema_error.is_none()
    }

    /// Message for `field`, if it fails one of its rules.
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    /// Generic message set when the structural check failed.
    pub fn schema_error(&self) -> Option<&'static str> {
        self.schema_error
    }
}

/// Applies the form-level rules to `draft`.
pub fn validate_form(draft: &UserDraft) -> ValidationOutcome {
    let mut errors = BTreeMap::new();
    for rule in &USER_RULES {
        if !errors.contains_key(&rule.field) && !rule.passes(draft) {
            errors.insert(rule.field, rule.message);
        }
    }
    ValidationOutcome {
        errors,
        schema_error: None,
    }
}

/// Applies the form-level rules, then the structural check.
///
/// A draft passing its field rules but failing the structural check is
/// reported as invalid without per-field messages.
pub fn validate(draft: &UserDraft) -> ValidationOutcome {
    let outcome = validate_form(draft);
    if !outcome.is_valid() {
        return outcome;
    }
    validate_value(&draft.to_candidate())
}

/// Structural check of an arbitrary candidate value.
pub fn validate_value(candidate: &Value) -> ValidationOutcome {
    if schema::is_valid(candidate) {
        ValidationOutcome::default()
    } else {
        ValidationOutcome::schema_invalid()
    }
}
