//! Composition strategies
//!
//! A composer turns an ordered chain of callbacks into one resolution step
//! over a base tag set. Callback errors are returned as-is and abort the
//! resolution; nothing partial is ever produced.

use super::registry::{Callback, RegistryKind};
use super::tags::TagSet;
use crate::error::Result;
use tracing::trace;

/// Strategy driving the callbacks of one registry entry
pub trait Composer {
    /// Run `chain` over `base` and return the tags to report.
    fn compose(&self, base: TagSet, chain: &[Callback]) -> Result<TagSet>;
}

/// Pipes the tag set through every callback in order: the output of one is
/// the input of the next. An empty chain returns the base unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialComposer;

impl Composer for SequentialComposer {
    fn compose(&self, base: TagSet, chain: &[Callback]) -> Result<TagSet> {
        let mut tags = base;
        for (position, callback) in chain.iter().enumerate() {
            tags = callback(&tags)?;
            trace!(position, tags = %tags, "Adjuster applied");
        }
        Ok(tags)
    }
}

/// Folds every callback's output into an accumulator. Each callback sees the
/// base unioned with what has been accumulated so far; only the accumulator
/// is reported, so base tags come back only if a callback re-adds them.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccumulatingComposer;

impl Composer for AccumulatingComposer {
    fn compose(&self, base: TagSet, chain: &[Callback]) -> Result<TagSet> {
        let mut accumulated = TagSet::new();
        for (position, callback) in chain.iter().enumerate() {
            let contributed = callback(&(&base | &accumulated))?;
            trace!(position, contributed = %contributed, "Defaulter applied");
            accumulated |= contributed;
        }
        Ok(accumulated)
    }
}

/// The composer each registry is resolved with
pub fn composer_for(kind: RegistryKind) -> &'static dyn Composer {
    match kind {
        RegistryKind::Adjust => &SequentialComposer,
        RegistryKind::Default => &AccumulatingComposer,
    }
}
