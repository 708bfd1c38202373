use super::UserRole;

/// The full set of parameters an operator can filter the user list by.
///
/// `role` and `age` are answered by the data source; `name` and `company`
/// are applied locally to whatever the data source returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub age: Option<u32>,
    pub name: Option<String>,
    pub company: Option<String>,
}

impl UserFilter {
    pub fn remote(&self) -> RemoteFilter {
        RemoteFilter {
            role: self.role,
            age: self.age,
        }
    }

    pub fn local(&self) -> LocalFilter {
        LocalFilter {
            name: self.name.clone(),
            company: self.company.clone(),
        }
    }
}

/// Parameters sent to the data source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RemoteFilter {
    pub role: Option<UserRole>,
    pub age: Option<u32>,
}

impl RemoteFilter {
    /// No remote constraint is set, so there is nothing to ask for.
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.age.is_none()
    }
}

/// Case-insensitive substring constraints applied on the client side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalFilter {
    pub name: Option<String>,
    pub company: Option<String>,
}

impl LocalFilter {
    pub fn new(name: Option<&str>, company: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_owned),
            company: company.map(str::to_owned),
        }
    }
}
