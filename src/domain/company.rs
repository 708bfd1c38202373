use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::User;

/// Users grouped under the company they work for.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanySummary {
    pub company: String,
    pub count: usize,
    pub users: Vec<User>,
}

/// Key the company listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompanySort {
    #[default]
    Company,
    Count,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Groups `users` by company, then orders the groups.
///
/// Ties on `count` fall back to the company name, ascending.
pub fn group_by_company(users: Vec<User>, sort: CompanySort, order: SortOrder) -> Vec<CompanySummary> {
    let mut groups: BTreeMap<String, Vec<User>> = BTreeMap::new();
    for user in users {
        groups.entry(user.company.clone()).or_default().push(user);
    }

    let mut summaries: Vec<CompanySummary> = groups
        .into_iter()
        .map(|(company, users)| CompanySummary {
            company,
            count: users.len(),
            users,
        })
        .collect();

    summaries.sort_by(|a, b| {
        let ordering = match sort {
            CompanySort::Company => a.company.cmp(&b.company),
            CompanySort::Count => a.count.cmp(&b.count),
        };
        let ordering = match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        match ordering {
            Ordering::Equal => a.company.cmp(&b.company),
            other => other,
        }
    });
    summaries
}
