//! Callback registries
//!
//! A registry maps an image tag name to the ordered list of callbacks that
//! transform its tags. Registration appends; nothing is ever replaced, and the
//! registration order is the invocation order.
//!
//! Registries are filled during an initialization phase through `&mut`
//! methods, then shared read-only. [`Registries::install`] publishes a pair for
//! the whole process.
//!
//! # Examples
//!
//! ```
//! use spritetags::domain::{Registries, TagSet};
//!
//! fn eileen_adjust_attributes(tags: &TagSet) -> anyhow::Result<TagSet> {
//!     Ok(tags - ["-happy"])
//! }
//!
//! let mut registries = Registries::new();
//! spritetags::register!(registries.adjusters, eileen_adjust_attributes).unwrap();
//! spritetags::register!(registries.defaulters, "eileen" => |_: &TagSet| Ok(["blush"])).unwrap();
//!
//! assert_eq!(registries.adjusters.chain("eileen").len(), 1);
//! assert_eq!(registries.defaulters.chain("eileen").len(), 1);
//! ```

use super::tags::{Tag, TagSet};
use crate::error::{Result, SpriteTagsError};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// A registered transformation, already coerced to produce a `TagSet`
pub type Callback = Box<dyn Fn(&TagSet) -> anyhow::Result<TagSet> + Send + Sync>;

/// Which of the two registries a callback belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    /// Callbacks chained sequentially, each replacing the tag set
    Adjust,
    /// Callbacks contributing default tags, chained by accumulation
    Default,
}

impl RegistryKind {
    /// Identifier suffix stripped when a name is inferred from a function
    pub fn suffix(&self) -> &'static str {
        match self {
            RegistryKind::Adjust => "_adjust_attributes",
            RegistryKind::Default => "_default_attributes",
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::Adjust => write!(f, "adjust"),
            RegistryKind::Default => write!(f, "default"),
        }
    }
}

/// Name-keyed, append-only lists of callbacks
pub struct Registry {
    kind: RegistryKind,
    entries: HashMap<String, Vec<Callback>>,
}

impl Registry {
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Append a callback under an explicit name.
    ///
    /// The callback may return any iterable of string-like items; it is
    /// wrapped so the composers always receive a `TagSet` back.
    pub fn register<F, I>(&mut self, name: &str, callback: F) -> Result<()>
    where
        F: Fn(&TagSet) -> anyhow::Result<I> + Send + Sync + 'static,
        I: IntoIterator,
        I::Item: Into<Tag>,
    {
        validate_name(name)?;

        let wrapped: Callback = Box::new(move |tags: &TagSet| -> anyhow::Result<TagSet> {
            Ok(callback(tags)?.into_iter().collect())
        });
        let chain = self.entries.entry(name.to_string()).or_default();
        chain.push(wrapped);

        debug!(
            registry = %self.kind,
            name,
            position = chain.len(),
            "Registered callback"
        );
        Ok(())
    }

    /// Append a callback under a name inferred from a function identifier:
    /// the registry's suffix is stripped if present, otherwise the identifier
    /// is used verbatim.
    pub fn register_inferred<F, I>(&mut self, identifier: &str, callback: F) -> Result<()>
    where
        F: Fn(&TagSet) -> anyhow::Result<I> + Send + Sync + 'static,
        I: IntoIterator,
        I::Item: Into<Tag>,
    {
        let name = self.infer_name(identifier);
        if name.is_empty() {
            return Err(SpriteTagsError::InvalidRegistrationArgument(format!(
                "cannot infer a name from '{}'",
                identifier
            )));
        }
        self.register(name, callback)
    }

    /// The name `register_inferred` would use for `identifier`
    pub fn infer_name<'a>(&self, identifier: &'a str) -> &'a str {
        identifier
            .strip_suffix(self.kind.suffix())
            .unwrap_or(identifier)
    }

    /// Callbacks for `name` in registration order; empty if none were registered
    pub fn chain(&self, name: &str) -> &[Callback] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for name in self.names() {
            map.entry(&name, &self.chain(name).len());
        }
        map.finish()
    }
}

/// A name must be usable as the first token of a request
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SpriteTagsError::InvalidRegistrationArgument(
            "name must not be empty".to_string(),
        ));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(SpriteTagsError::InvalidRegistrationArgument(format!(
            "name '{}' contains whitespace",
            name
        )));
    }
    Ok(())
}

/// The adjuster and defaulter registries used by one process
#[derive(Debug)]
pub struct Registries {
    pub adjusters: Registry,
    pub defaulters: Registry,
}

static INSTALLED: OnceLock<Registries> = OnceLock::new();
static EMPTY: OnceLock<Registries> = OnceLock::new();

impl Registries {
    pub fn new() -> Self {
        Self {
            adjusters: Registry::new(RegistryKind::Adjust),
            defaulters: Registry::new(RegistryKind::Default),
        }
    }

    pub fn get(&self, kind: RegistryKind) -> &Registry {
        match kind {
            RegistryKind::Adjust => &self.adjusters,
            RegistryKind::Default => &self.defaulters,
        }
    }

    pub fn get_mut(&mut self, kind: RegistryKind) -> &mut Registry {
        match kind {
            RegistryKind::Adjust => &mut self.adjusters,
            RegistryKind::Default => &mut self.defaulters,
        }
    }

    /// End the initialization phase: publish these registries process-wide.
    /// Can succeed only once per process.
    pub fn install(self) -> Result<&'static Registries> {
        INSTALLED
            .set(self)
            .map_err(|_| SpriteTagsError::Config("registries already installed".to_string()))?;
        Ok(Self::global())
    }

    /// The installed registries, or an empty pair if none were installed
    pub fn global() -> &'static Registries {
        INSTALLED
            .get()
            .unwrap_or_else(|| EMPTY.get_or_init(Registries::new))
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::new()
    }
}

/// Register a callback in either call shape.
///
/// `register!(registry, "name" => callback)` uses the explicit name;
/// `register!(registry, some_fn)` infers it from the function identifier.
#[macro_export]
macro_rules! register {
    ($registry:expr, $callback:ident) => {
        $registry.register_inferred(stringify!($callback), $callback)
    };
    ($registry:expr, $name:expr => $callback:expr) => {
        $registry.register($name, $callback)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn identity(tags: &TagSet) -> anyhow::Result<TagSet> {
        Ok(tags.copy())
    }

    #[test]
    fn test_unregistered_name_is_empty_chain() {
        let registry = Registry::new(RegistryKind::Adjust);
        assert!(registry.chain("eileen").is_empty());
        assert!(!registry.contains("eileen"));
    }

    #[test]
    fn test_register_appends() {
        let mut registry = Registry::new(RegistryKind::Adjust);
        registry.register("eileen", identity).unwrap();
        registry.register("eileen", identity).unwrap();
        assert_eq!(registry.chain("eileen").len(), 2);
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = Registry::new(RegistryKind::Default);

        for label in ["A", "B", "C"] {
            let calls = Arc::clone(&calls);
            registry
                .register("eileen", move |_: &TagSet| {
                    calls.lock().unwrap().push(label);
                    Ok(Vec::<String>::new())
                })
                .unwrap();
        }

        for callback in registry.chain("eileen") {
            callback(&TagSet::new()).unwrap();
        }
        assert_eq!(*calls.lock().unwrap(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_infer_name_strips_suffix() {
        let adjusters = Registry::new(RegistryKind::Adjust);
        assert_eq!(adjusters.infer_name("eileen_adjust_attributes"), "eileen");
        assert_eq!(adjusters.infer_name("eileen_default_attributes"), "eileen_default_attributes");

        let defaulters = Registry::new(RegistryKind::Default);
        assert_eq!(defaulters.infer_name("lucy_default_attributes"), "lucy");
        assert_eq!(defaulters.infer_name("lucy"), "lucy");
    }

    #[test]
    fn test_register_inferred() {
        let mut registry = Registry::new(RegistryKind::Adjust);
        registry
            .register_inferred("eileen_adjust_attributes", identity)
            .unwrap();
        registry.register_inferred("lucy", identity).unwrap();
        assert_eq!(registry.names(), vec!["eileen", "lucy"]);
    }

    #[test]
    fn test_register_macro_shapes() {
        fn eileen_adjust_attributes(tags: &TagSet) -> anyhow::Result<TagSet> {
            Ok(tags.copy())
        }

        let mut registry = Registry::new(RegistryKind::Adjust);
        register!(registry, eileen_adjust_attributes).unwrap();
        register!(registry, "eileen" => |_: &TagSet| Ok(["smile"])).unwrap();
        assert_eq!(registry.chain("eileen").len(), 2);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = Registry::new(RegistryKind::Adjust);
        let err = registry.register("", identity).unwrap_err();
        assert!(matches!(err, SpriteTagsError::InvalidRegistrationArgument(_)));

        let err = registry
            .register_inferred("_adjust_attributes", identity)
            .unwrap_err();
        assert!(matches!(err, SpriteTagsError::InvalidRegistrationArgument(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let mut registry = Registry::new(RegistryKind::Default);
        let err = registry.register("eileen happy", identity).unwrap_err();
        assert!(matches!(err, SpriteTagsError::InvalidRegistrationArgument(_)));
    }

    #[test]
    fn test_callback_output_is_coerced() {
        let mut registry = Registry::new(RegistryKind::Adjust);
        registry
            .register("eileen", |_: &TagSet| Ok(vec!["-sad".to_string()]))
            .unwrap();
        let result = registry.chain("eileen")[0](&TagSet::new()).unwrap();
        assert!(!result.find(Some("sad"), None).unwrap().unwrap().added());
    }

    #[test]
    fn test_registries_select_by_kind() {
        let mut registries = Registries::new();
        registries
            .get_mut(RegistryKind::Default)
            .register("eileen", identity)
            .unwrap();
        assert!(registries.get(RegistryKind::Default).contains("eileen"));
        assert!(!registries.get(RegistryKind::Adjust).contains("eileen"));
    }

    #[test]
    fn test_debug_lists_chain_lengths() {
        let mut registry = Registry::new(RegistryKind::Adjust);
        registry.register("eileen", identity).unwrap();
        assert_eq!(format!("{:?}", registry), "{\"eileen\": 1}");
    }
}
