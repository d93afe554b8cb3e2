//! Reloadable registries for content-pack driven data.
//!
//! # Mental Model
//!
//! 1. **Build:** bootstrap code seeds a [`RegistryBuilder`] per family with the
//!    built-in entries, then content packs layer their entries on top.
//! 2. **Freeze:** each builder becomes an immutable [`DynamicRegistry`]; the
//!    registries of one reload are collected into a [`RegistrySet`].
//! 3. **Publish:** [`ActiveRegistries::swap`] installs the set atomically.
//! 4. **Consume:** readers take a snapshot with [`ActiveRegistries::load`] and
//!    resolve [`RegistryKey`]s against it.
//!
//! Keys are names, not references: a key parsed under one generation resolves
//! under the next as long as its identifier is still registered.
//!
//! Tags live in a separate [`TagCatalog`] and are consulted lazily by
//! [`ObjectSet`].

mod builder;
mod error;
mod identifier;
mod key;
mod object_set;
mod pack;
mod registry;
mod set;
mod tags;

pub use builder::{DuplicatePolicy, RegistryBuilder};
pub use error::RegistryError;
pub use identifier::{DEFAULT_NAMESPACE, Identifier, IdentifierError};
pub use key::{RawId, RegistryKey};
pub use object_set::{ObjectEntries, ObjectSet};
pub use pack::DataPack;
pub use registry::DynamicRegistry;
pub use set::{ActiveRegistries, RegistrySet};
pub use tags::{BasicType, TagCatalog, TagEntry};
