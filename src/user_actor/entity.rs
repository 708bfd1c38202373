use md5::{Digest, Md5};

use crate::actor_framework::Entity;
use crate::domain::{RemoteFilter, User};
use crate::error::StoreError;
use crate::validation::rules::is_email;

/// Message returned whenever a new user fails the server-side checks.
pub const ILLEGAL_USER_MESSAGE: &str = "Tried to add an illegal new user";

/// Upper bound, exclusive, on what the store accepts as a plausible age.
pub const REASONABLE_AGE_LIMIT: u8 = 150;

/// Runs the checks the store applies to a user before accepting it and
/// returns a description of every failing one.
pub fn server_checks(user: &User) -> Vec<String> {
    let mut failures = Vec::new();
    if user.name.is_empty() {
        failures.push("User must have a non-empty user name".to_owned());
    }
    if user.age == 0 || user.age >= REASONABLE_AGE_LIMIT {
        failures.push(format!(
            "User's age must be greater than zero and less than {REASONABLE_AGE_LIMIT}; was {}",
            user.age
        ));
    }
    if !is_email(&user.email) {
        failures.push(format!("User must have a legal email; {} is not one", user.email));
    }
    if user.company.is_empty() {
        failures.push("User must have a non-empty company name".to_owned());
    }
    failures
}

/// Gravatar identicon URL for `email`.
pub fn generate_avatar(email: &str) -> String {
    let hash = Md5::digest(email.trim().to_lowercase().as_bytes());
    format!("https://gravatar.com/avatar/{}?d=identicon", hex::encode(hash))
}

impl Entity for User {
    type Id = String;
    type CreatePayload = User;
    type Query = RemoteFilter;

    /// Creates a stored User, assigning it `id` and, unless one was
    /// supplied, an avatar derived from the email.
    ///
    /// # Errors
    /// Rejects the payload with status 400 if any server-side check fails.
    fn from_create(id: String, payload: User) -> Result<Self, StoreError> {
        let details = server_checks(&payload);
        if !details.is_empty() {
            return Err(StoreError::Rejected {
                status: 400,
                message: ILLEGAL_USER_MESSAGE.to_owned(),
                details,
            });
        }
        let avatar = payload.avatar.clone().unwrap_or_else(|| generate_avatar(&payload.email));
        Ok(Self {
            id: Some(id),
            avatar: Some(avatar),
            ..payload
        })
    }

    /// Ages at or beyond [`REASONABLE_AGE_LIMIT`] are refused outright.
    fn check_query(query: &RemoteFilter) -> Result<(), StoreError> {
        match query.age {
            Some(age) if age >= u32::from(REASONABLE_AGE_LIMIT) => Err(StoreError::Rejected {
                status: 400,
                message: format!("User's age must be less than {REASONABLE_AGE_LIMIT}; was {age}"),
                details: vec![],
            }),
            _ => Ok(()),
        }
    }

    /// Exact match on role and age, each only when set.
    fn matches(&self, query: &RemoteFilter) -> bool {
        query.role.map_or(true, |role| self.role == role)
            && query.age.map_or(true, |age| u32::from(self.age) == age)
    }
}
