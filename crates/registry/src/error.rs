use crate::{DataPack, Identifier, IdentifierError};

/// Registry construction and lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// An identifier was registered twice in one generation and the policy forbids it.
	#[error("duplicate {family} entry {id}: already registered by {existing}, rejected from {incoming}")]
	Duplicate {
		family: &'static str,
		id: Identifier,
		existing: DataPack,
		incoming: DataPack,
	},

	/// A key did not resolve against this registry instance.
	#[error("{id} is not registered in {family}")]
	NotFound { family: &'static str, id: Identifier },

	#[error(transparent)]
	InvalidIdentifier(#[from] IdentifierError),
}
