//! Infrastructure layer - Rule files and their compilation into callbacks

pub mod config;
pub mod rules;

pub use config::{RuleFile, RuleSpec, RULES_ENV, RULE_FILE_NAME};
pub use rules::{register_rules, registries_from};
