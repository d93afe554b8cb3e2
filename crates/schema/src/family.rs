//! Declaration macros for open families and closed enumerations.

/// Declares an open family.
///
/// Expands to the sum type, one shared [`cobble_codec::VariantCodec`] per
/// variant (built on first use, so variants may contain the family itself),
/// the [`cobble_codec::TaggedVariant`] impl, and `create_default_registry()`
/// seeding a builder with every built-in variant under the `minecraft`
/// namespace.
macro_rules! tagged_family {
	(
		$(#[$meta:meta])*
		pub enum $family:ident in $registry:literal {
			$(
				$(#[$vmeta:meta])*
				$id:literal => $variant:ident($payload:ty) = $codec:expr,
			)*
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq)]
		pub enum $family {
			$( $(#[$vmeta])* $variant($payload), )*
		}

		$(
			impl From<$payload> for $family {
				fn from(payload: $payload) -> Self {
					Self::$variant(payload)
				}
			}
		)*

		paste::paste! {
			$(
				static [<$variant:snake:upper>]: std::sync::LazyLock<cobble_codec::VariantCodec<$family>> =
					std::sync::LazyLock::new(|| {
						cobble_codec::VariantCodec::of(
							$codec,
							|value| match value {
								$family::$variant(payload) => Some(payload),
								#[allow(unreachable_patterns)]
								_ => None,
							},
							$family::$variant,
						)
					});
			)*

			impl cobble_codec::TaggedVariant for $family {
				fn variant_codec(&self) -> cobble_codec::VariantCodec<Self> {
					match self {
						$( Self::$variant(_) => [<$variant:snake:upper>].clone(), )*
					}
				}
			}

			impl $family {
				/// Registry family holding this type's variant codecs.
				pub const FAMILY: &'static str = $registry;

				/// Identifier paths of the built-in variants, in registration order.
				pub const BUILTIN: &'static [&'static str] = &[$($id),*];

				/// Path of the built-in identifier this value's variant is registered under.
				pub fn builtin_name(&self) -> &'static str {
					match self {
						$( Self::$variant(_) => $id, )*
					}
				}

				/// Fresh builder holding every built-in variant, the seed of each reload.
				pub fn create_default_registry() -> Result<
					cobble_registry::RegistryBuilder<cobble_codec::VariantCodec<Self>>,
					cobble_registry::RegistryError,
				> {
					let mut builder = cobble_registry::RegistryBuilder::new($registry);
					$(
						builder.register(
							cobble_registry::Identifier::minecraft($id),
							[<$variant:snake:upper>].clone(),
							cobble_registry::DataPack::MinecraftCore,
						)?;
					)*
					Ok(builder)
				}
			}
		}
	};
}

pub(crate) use tagged_family;

/// Declares a closed enumeration with canonical lowercase names and its
/// [`cobble_codec::StringEnum`] impl.
macro_rules! string_enum {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident as $family:literal {
			$( $(#[$vmeta:meta])* $variant:ident = $wire:literal, )*
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		$vis enum $name {
			$( $(#[$vmeta])* $variant, )*
		}

		impl cobble_codec::StringEnum for $name {
			const FAMILY: &'static str = $family;
			const VARIANTS: &'static [Self] = &[$(Self::$variant),*];

			fn name(self) -> &'static str {
				match self {
					$( Self::$variant => $wire, )*
				}
			}
		}
	};
}

pub(crate) use string_enum;
