use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::Identifier;

/// A typed name for a registry entry.
///
/// Keys hold no reference to any registry instance. They are resolved with
/// [`crate::DynamicRegistry::get`] against whichever generation is current, so
/// parsed data holding keys survives a reload unchanged.
pub struct RegistryKey<T> {
	id: Identifier,
	_marker: PhantomData<fn() -> T>,
}

impl<T> RegistryKey<T> {
	pub fn new(id: Identifier) -> Self {
		Self {
			id,
			_marker: PhantomData,
		}
	}

	pub fn id(&self) -> &Identifier {
		&self.id
	}

	pub fn into_id(self) -> Identifier {
		self.id
	}
}

impl<T> Clone for RegistryKey<T> {
	fn clone(&self) -> Self {
		Self::new(self.id.clone())
	}
}

impl<T> PartialEq for RegistryKey<T> {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl<T> Eq for RegistryKey<T> {}

impl<T> Hash for RegistryKey<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl<T> fmt::Debug for RegistryKey<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("RegistryKey").field(&self.id.as_str()).finish()
	}
}

impl<T> fmt::Display for RegistryKey<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.id, f)
	}
}

impl<T> From<Identifier> for RegistryKey<T> {
	fn from(id: Identifier) -> Self {
		Self::new(id)
	}
}

/// Dense per-instance index of an entry, in registration order.
///
/// Unlike [`RegistryKey`], a raw id is only meaningful for the instance that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawId(pub u32);

impl RawId {
	#[inline]
	pub fn index(self) -> usize {
		self.0 as usize
	}
}
