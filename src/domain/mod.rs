//! Domain layer - Tag algebra, callback registries and composition strategies

pub mod composer;
pub mod registry;
pub mod tags;

pub use composer::{AccumulatingComposer, Composer, SequentialComposer};
pub use registry::{Callback, Registries, Registry, RegistryKind};
pub use tags::{Tag, TagSet};
