//! Game data schemas built on `cobble-codec`, their default registries, and
//! the content-pack loader.
//!
//! # Mental Model
//!
//! - Open families ([`enchant::EntityEffect`], [`value::LevelBasedValue`]) are
//!   declared with one line per variant. Each declaration yields the Rust sum
//!   type and a `create_default_registry()` seeding its built-in variants.
//! - Closed value types ([`value::FloatProvider`], [`sound::SoundEvent`],
//!   [`particle::Particle`]) dispatch by hand and need no registry.
//! - [`bootstrap::default_registries`] gathers every built-in family into one
//!   [`cobble_registry::RegistrySet`]; [`loader::PackLoader`] layers content
//!   packs on top of it and publishes the result.

mod family;

pub mod block;
pub mod bootstrap;
pub mod crossbow;
pub mod damage;
pub mod enchant;
pub mod loader;
pub mod metadata;
pub mod particle;
pub mod sound;
pub mod value;

pub use bootstrap::{default_context, default_registries};

#[cfg(test)]
mod tests;
