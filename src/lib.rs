//! spritetags - Variant tag resolution for displayed images
//!
//! Resolves the attribute tags attached to a shown image (e.g. a character
//! sprite) by running registered callbacks over a polarity-aware tag set.
//! Adjusters rewrite the set one after another; defaulters contribute tags
//! that are accumulated.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::Dispatcher;
pub use domain::{Registries, Tag, TagSet};
pub use error::SpriteTagsError;
