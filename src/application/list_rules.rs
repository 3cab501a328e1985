//! List rules use case

use crate::domain::Registries;
use std::collections::BTreeSet;

/// Number of callbacks registered for one name in each registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSummary {
    pub name: String,
    pub adjusters: usize,
    pub defaulters: usize,
}

/// Summarize every registered name, sorted by name
pub fn list_rules(registries: &Registries) -> Vec<RuleSummary> {
    let names: BTreeSet<&str> = registries
        .adjusters
        .names()
        .into_iter()
        .chain(registries.defaulters.names())
        .collect();

    names
        .into_iter()
        .map(|name| RuleSummary {
            name: name.to_string(),
            adjusters: registries.adjusters.chain(name).len(),
            defaulters: registries.defaulters.chain(name).len(),
        })
        .collect()
}
