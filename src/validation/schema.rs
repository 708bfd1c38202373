//! Structural check of a candidate record against the [`User`] shape.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::User;

/// Message reported for any structural mismatch.
pub const SCHEMA_MESSAGE: &str = "The user record does not have the expected shape";

/// Checks that `candidate` has exactly the shape of a [`User`]: required
/// fields present with the right types, no unknown fields, `age` in
/// `0..=255` and `role` one of the known roles.
///
/// # Errors
///
/// Returns the deserializer's description of the first mismatch.
pub fn check(candidate: &Value) -> Result<User, String> {
    User::deserialize(candidate).map_err(|e| e.to_string())
}

pub fn is_valid(candidate: &Value) -> bool {
    check(candidate).is_ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::UserRole;

    #[test]
    fn accepts_a_complete_record() {
        let user = check(&json!({
            "name": "Test User",
            "age": 30,
            "company": "Test Company",
            "email": "test@example.com",
            "role": "editor",
        }))
        .unwrap();

        assert_eq!(user.role, UserRole::Editor);
        assert_eq!(user.id, None);
    }

    #[test]
    fn accepts_optional_id_and_avatar() {
        assert!(is_valid(&json!({
            "_id": "588935f57546a2daea44de7c",
            "name": "Test User",
            "age": 30,
            "company": "Test Company",
            "email": "test@example.com",
            "avatar": "https://gravatar.com/avatar/1",
            "role": "viewer",
        })));
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(!is_valid(&json!({
            "name": "Test User",
            "age": 30,
            "company": "Test Company",
            "email": "test@example.com",
            "role": "invalidrole",
        })));
    }

    #[test]
    fn rejects_wrong_types_and_missing_fields() {
        assert!(!is_valid(&json!({
            "name": "Test User",
            "age": "notanumber",
            "company": "Test Company",
            "email": "test@example.com",
            "role": "viewer",
        })));
        assert!(!is_valid(&json!({
            "name": "Test User",
            "age": 30,
            "company": "Test Company",
            "role": "viewer",
        })));
        assert!(!is_valid(&json!({
            "name": "Test User",
            "age": -1,
            "company": "Test Company",
            "email": "test@example.com",
            "role": "viewer",
        })));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(!is_valid(&json!({
            "name": "Test User",
            "age": 30,
            "company": "Test Company",
            "email": "test@example.com",
            "role": "viewer",
            "password": "hunter2",
        })));
    }

    #[test]
    fn rejects_non_objects() {
        assert!(!is_valid(&json!("Test User")));
        assert!(!is_valid(&Value::Null));
    }
}
