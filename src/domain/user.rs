use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Closed set of roles a [`User`] may hold.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Editor,
    #[default]
    Viewer,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Editor, UserRole::Viewer];

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Editor => "editor",
            UserRole::Viewer => "viewer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or("invalid `UserRole`")
    }
}

/// Represents a user record as it is stored and listed.
///
/// The serialized shape is the structural schema every persisted record
/// satisfies: unknown fields are refused and `age` must fit an unsigned byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub age: u8,
    pub company: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: UserRole,
}

impl User {
    /// Creates a new, not yet persisted, User.
    ///
    /// # Notes
    /// The `id` field stays `None` until the store assigns one.
    pub fn new(
        name: impl Into<String>,
        age: u8,
        company: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            age,
            company: company.into(),
            email: email.into(),
            avatar: None,
            role,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// A user record under construction in an editing form.
///
/// Every field may be missing or out of range; nothing here is checked until
/// the draft goes through [`crate::validation`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub role: UserRole,
}

impl UserDraft {
    /// Builds the JSON candidate submitted for the structural check.
    ///
    /// An untouched company field is sent as an empty string, the same way an
    /// empty form input would be.
    pub fn to_candidate(&self) -> Value {
        let mut object = Map::new();
        if let Some(name) = &self.name {
            object.insert("name".to_owned(), Value::from(name.as_str()));
        }
        if let Some(age) = self.age {
            object.insert("age".to_owned(), Value::from(age));
        }
        object.insert(
            "company".to_owned(),
            Value::from(self.company.as_deref().unwrap_or_default()),
        );
        if let Some(email) = &self.email {
            object.insert("email".to_owned(), Value::from(email.as_str()));
        }
        if let Some(avatar) = &self.avatar {
            object.insert("avatar".to_owned(), Value::from(avatar.as_str()));
        }
        object.insert("role".to_owned(), Value::from(self.role.as_str()));
        Value::Object(object)
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            name: Some(user.name.clone()),
            age: Some(i64::from(user.age)),
            company: Some(user.company.clone()),
            email: Some(user.email.clone()),
            avatar: user.avatar.clone(),
            role: user.role,
        }
    }
}
