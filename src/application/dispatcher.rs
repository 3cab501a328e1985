//! Resolution entry point
//!
//! A request is the raw tuple a host hands over when showing an image: the
//! image tag name followed by attribute tokens, each optionally prefixed with
//! the removal marker. The reply has the same shape and holds plain strings
//! only.

use crate::domain::composer::composer_for;
use crate::domain::{Registries, RegistryKind, TagSet};
use crate::error::{Result, SpriteTagsError};
use tracing::debug;

/// Looks up callbacks for a request and runs the matching composer
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    registries: &'a Registries,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registries: &'a Registries) -> Self {
        Self { registries }
    }

    /// Dispatcher over the process-wide registries
    pub fn global() -> Dispatcher<'static> {
        Dispatcher::new(Registries::global())
    }

    /// Run the adjusters registered for the request's name, sequentially.
    ///
    /// # Examples
    ///
    /// ```
    /// use spritetags::application::Dispatcher;
    /// use spritetags::domain::{Registries, TagSet};
    ///
    /// let mut registries = Registries::new();
    /// registries
    ///     .adjusters
    ///     .register("eileen", |tags: &TagSet| Ok(tags - ["-happy"]))
    ///     .unwrap();
    ///
    /// let reply = Dispatcher::new(&registries)
    ///     .adjust(&["eileen", "-happy", "wave"])
    ///     .unwrap();
    /// assert_eq!(reply, vec!["eileen", "wave"]);
    /// ```
    pub fn adjust<S: AsRef<str>>(&self, request: &[S]) -> Result<Vec<String>> {
        self.dispatch(RegistryKind::Adjust, request)
    }

    /// Run the defaulters registered for the request's name, accumulating
    /// their contributions. Only the contributed tags are returned.
    pub fn default_attributes<S: AsRef<str>>(&self, request: &[S]) -> Result<Vec<String>> {
        self.dispatch(RegistryKind::Default, request)
    }

    /// Adjust the request, then add the defaults computed from the adjusted
    /// tags. This is the full set a host would display.
    pub fn resolve<S: AsRef<str>>(&self, request: &[S]) -> Result<Vec<String>> {
        let (name, base) = split_request(request)?;

        let adjusted = self.run(RegistryKind::Adjust, name, base)?;
        let defaults = self.run(RegistryKind::Default, name, adjusted.copy())?;

        Ok(flatten(name, &(adjusted | defaults)))
    }

    /// Dispatch to the registry of `kind`, using its composer
    pub fn dispatch<S: AsRef<str>>(&self, kind: RegistryKind, request: &[S]) -> Result<Vec<String>> {
        let (name, base) = split_request(request)?;
        let tags = self.run(kind, name, base)?;
        Ok(flatten(name, &tags))
    }

    fn run(&self, kind: RegistryKind, name: &str, base: TagSet) -> Result<TagSet> {
        let chain = self.registries.get(kind).chain(name);
        debug!(
            registry = %kind,
            name,
            callbacks = chain.len(),
            base = %base,
            "Resolving tags"
        );
        composer_for(kind).compose(base, chain)
    }
}

/// First token is the name, the rest become the base tag set
fn split_request<S: AsRef<str>>(request: &[S]) -> Result<(&str, TagSet)> {
    let (name, tokens) = request.split_first().ok_or(SpriteTagsError::EmptyRequest)?;
    let base = tokens.iter().map(|token| token.as_ref()).collect();
    Ok((name.as_ref(), base))
}

/// Name followed by the rendered tags, as plain strings
fn flatten(name: &str, tags: &TagSet) -> Vec<String> {
    let mut reply = Vec::with_capacity(tags.len() + 1);
    reply.push(name.to_string());
    reply.extend(tags.to_strings());
    reply
}
