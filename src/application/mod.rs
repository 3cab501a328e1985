//! Application layer - Use cases and orchestration

pub mod dispatcher;
pub mod list_rules;
pub mod load_rules;

pub use dispatcher::Dispatcher;
pub use list_rules::{list_rules, RuleSummary};
pub use load_rules::load_registries;
