//! Load rules use case

use crate::domain::Registries;
use crate::error::Result;
use crate::infrastructure::{register_rules, RuleFile};
use std::path::Path;
use tracing::debug;

/// Build registries from the discovered rule file.
///
/// With no explicit path, no environment override and no `spritetags.toml`
/// above the current directory, the registries are empty and every request
/// resolves to itself.
pub fn load_registries(explicit: Option<&Path>) -> Result<Registries> {
    let mut registries = Registries::new();

    match RuleFile::discover(explicit)? {
        Some(path) => {
            let file = RuleFile::load(&path)?;
            register_rules(&file, &mut registries)?;
        }
        None => debug!("No rule file found, using empty registries"),
    }

    Ok(registries)
}
