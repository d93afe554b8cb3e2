//! Built-in registries, the base layer of every reload.

use std::sync::Arc;

use cobble_codec::Context;
use cobble_registry::{RegistryError, RegistrySet, TagCatalog};

use crate::damage::DamageType;
use crate::enchant::EntityEffect;
use crate::value::LevelBasedValue;

/// Registry set holding every built-in family and nothing from content packs.
pub fn default_registries() -> Result<RegistrySet, RegistryError> {
	Ok(RegistrySet::new()
		.with(DamageType::create_default_registry()?.freeze())
		.with(LevelBasedValue::create_default_registry()?.freeze())
		.with(EntityEffect::create_default_registry()?.freeze()))
}

/// Decoding context over [`default_registries`] and an empty tag catalog.
pub fn default_context() -> Result<Context, RegistryError> {
	Ok(Context::new(Arc::new(default_registries()?), Arc::new(TagCatalog::new())))
}
