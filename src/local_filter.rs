//! Client-side narrowing of a user list by name and company.

use crate::domain::{LocalFilter, User};

/// Keeps the users whose name and company contain the requested text,
/// ignoring case. A missing or empty constraint matches everything.
pub fn filter_users(users: &[User], filter: &LocalFilter) -> Vec<User> {
    let name = needle(filter.name.as_deref());
    let company = needle(filter.company.as_deref());

    users
        .iter()
        .filter(|user| matches(&user.name, name.as_deref()) && matches(&user.company, company.as_deref()))
        .cloned()
        .collect()
}

fn needle(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_lowercase)
}

fn matches(haystack: &str, needle: Option<&str>) -> bool {
    needle.map_or(true, |n| haystack.to_lowercase().contains(n))
}
