//! Declarative rules compiled into registry callbacks
//!
//! An adjust rule rewrites the tag set when its guard passes:
//! `tags - remove | add`. A default rule contributes `add` when its guard
//! passes and nothing otherwise. Rules register in file order.

use super::config::{RuleFile, RuleSpec};
use crate::domain::{Registries, Registry, RegistryKind, Tag, TagSet};
use crate::error::{Result, SpriteTagsError};
use regex::Regex;
use tracing::info;

/// Condition a tag set must meet for a rule to fire
#[derive(Debug, Clone)]
struct Guard {
    when: TagSet,
    unless: TagSet,
    unless_matching: Option<Regex>,
}

impl Guard {
    fn passes(&self, tags: &TagSet) -> bool {
        self.when.iter().all(|tag| tags.contains(tag.as_str()))
            && self.unless.iter().all(|tag| !tags.contains(tag.as_str()))
            && self
                .unless_matching
                .as_ref()
                .map_or(true, |pattern| !tags.iter().any(|tag| pattern.is_match(tag.name())))
    }
}

#[derive(Debug, Clone)]
struct Rule {
    guard: Guard,
    add: TagSet,
    remove: TagSet,
}

impl Rule {
    fn compile(spec: &RuleSpec) -> Result<Self> {
        let unless_matching = spec
            .unless_matching
            .as_deref()
            .map(Regex::new)
            .transpose()?;

        Ok(Rule {
            guard: Guard {
                when: tag_list("when", &spec.when)?,
                unless: tag_list("unless", &spec.unless)?,
                unless_matching,
            },
            add: tag_list("add", &spec.add)?,
            remove: tag_list("remove", &spec.remove)?,
        })
    }

    fn adjust(&self, tags: &TagSet) -> TagSet {
        if self.guard.passes(tags) {
            (tags - &self.remove) | &self.add
        } else {
            tags.copy()
        }
    }

    fn default_attributes(&self, tags: &TagSet) -> TagSet {
        if self.guard.passes(tags) {
            self.add.copy()
        } else {
            TagSet::new()
        }
    }
}

/// Parse rule tags, rejecting ones with an empty name
fn tag_list(field: &str, raw: &[String]) -> Result<TagSet> {
    let mut tags = TagSet::new();
    for text in raw {
        let tag = Tag::new(text);
        if tag.name().is_empty() {
            return Err(SpriteTagsError::Config(format!(
                "empty tag in '{}' list",
                field
            )));
        }
        tags.insert(tag);
    }
    Ok(tags)
}

/// Register one rule spec in `registry`
fn register_rule(registry: &mut Registry, spec: &RuleSpec) -> Result<()> {
    let rule = Rule::compile(spec)?;
    let kind = registry.kind();

    let callback = move |tags: &TagSet| -> anyhow::Result<TagSet> {
        Ok(match kind {
            RegistryKind::Adjust => rule.adjust(tags),
            RegistryKind::Default => rule.default_attributes(tags),
        })
    };

    match (spec.name.as_deref(), spec.function.as_deref()) {
        (Some(name), None) => registry.register(name, callback),
        (None, Some(function)) => registry.register_inferred(function, callback),
        (Some(_), Some(_)) => Err(SpriteTagsError::InvalidRegistrationArgument(
            "both 'name' and 'function' given".to_string(),
        )),
        (None, None) => Err(SpriteTagsError::InvalidRegistrationArgument(
            "one of 'name' or 'function' is required".to_string(),
        )),
    }
}

/// Register every rule of `file` into `registries`
pub fn register_rules(file: &RuleFile, registries: &mut Registries) -> Result<()> {
    for spec in &file.adjust {
        register_rule(&mut registries.adjusters, spec)?;
    }
    for spec in &file.defaults {
        register_rule(&mut registries.defaulters, spec)?;
    }

    info!(
        adjust = file.adjust.len(),
        default = file.defaults.len(),
        "Registered rules"
    );
    Ok(())
}

/// Build registries from a rule file
pub fn registries_from(file: &RuleFile) -> Result<Registries> {
    let mut registries = Registries::new();
    register_rules(file, &mut registries)?;
    Ok(registries)
}
