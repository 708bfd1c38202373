//! Field-level rules checked while a draft is being edited.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::UserDraft;

/// Draft fields carrying client-side rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Age,
    Email,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Age => "age",
            Field::Email => "email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named predicate over one draft field plus the message shown when it fails.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub message: &'static str,
    check: fn(&UserDraft) -> bool,
}

impl FieldRule {
    pub fn passes(&self, draft: &UserDraft) -> bool {
        (self.check)(draft)
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish()
    }
}

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 50;
pub const AGE_MIN: i64 = 1;
pub const AGE_MAX: i64 = 100;

/// Rules for a new user, in display order. Within a field the first failing
/// rule provides the message.
pub static USER_RULES: [FieldRule; 8] = [
    FieldRule {
        field: Field::Name,
        message: "Name is required",
        check: name_present,
    },
    FieldRule {
        field: Field::Name,
        message: "Name must be at least 2 characters long",
        check: name_long_enough,
    },
    FieldRule {
        field: Field::Name,
        message: "Name cannot be more than 50 characters long",
        check: name_short_enough,
    },
    FieldRule {
        field: Field::Age,
        message: "Age is required",
        check: age_present,
    },
    FieldRule {
        field: Field::Age,
        message: "Age must be at least 1",
        check: age_at_least_min,
    },
    FieldRule {
        field: Field::Age,
        message: "Age may not be greater than 100",
        check: age_at_most_max,
    },
    FieldRule {
        field: Field::Email,
        message: "Email is required",
        check: email_present,
    },
    FieldRule {
        field: Field::Email,
        message: "Email must be formatted properly",
        check: email_well_formed,
    },
];

fn name_len(draft: &UserDraft) -> usize {
    draft.name.as_deref().map_or(0, |n| n.chars().count())
}

fn name_present(draft: &UserDraft) -> bool {
    draft.name.as_deref().is_some_and(|n| !n.is_empty())
}

fn name_long_enough(draft: &UserDraft) -> bool {
    name_len(draft) >= NAME_MIN_LEN
}

fn name_short_enough(draft: &UserDraft) -> bool {
    name_len(draft) <= NAME_MAX_LEN
}

fn age_present(draft: &UserDraft) -> bool {
    draft.age.is_some()
}

fn age_at_least_min(draft: &UserDraft) -> bool {
    draft.age.is_some_and(|a| a >= AGE_MIN)
}

fn age_at_most_max(draft: &UserDraft) -> bool {
    draft.age.is_some_and(|a| a <= AGE_MAX)
}

fn email_present(draft: &UserDraft) -> bool {
    draft.email.as_deref().is_some_and(|e| !e.is_empty())
}

fn email_well_formed(draft: &UserDraft) -> bool {
    draft.email.as_deref().is_some_and(is_email)
}

/// Checks the `local@domain` shape: a non-empty local part and a domain
/// containing a dot with text on both sides.
pub fn is_email(address: &str) -> bool {
    static REGEX: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("valid regex")
    });

    REGEX.is_match(address)
}
