/// Discriminant of a [`crate::Tag`], numbered by its wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TagKind {
	End = 0,
	Byte = 1,
	Short = 2,
	Int = 3,
	Long = 4,
	Float = 5,
	Double = 6,
	ByteArray = 7,
	String = 8,
	List = 9,
	Compound = 10,
	IntArray = 11,
	LongArray = 12,
}

impl TagKind {
	/// Returns the kind for a wire id, or `None` for ids outside `0..=12`.
	pub const fn from_id(id: u8) -> Option<Self> {
		Some(match id {
			0 => Self::End,
			1 => Self::Byte,
			2 => Self::Short,
			3 => Self::Int,
			4 => Self::Long,
			5 => Self::Float,
			6 => Self::Double,
			7 => Self::ByteArray,
			8 => Self::String,
			9 => Self::List,
			10 => Self::Compound,
			11 => Self::IntArray,
			12 => Self::LongArray,
			_ => return None,
		})
	}

	/// Returns the wire id.
	#[inline]
	pub const fn id(self) -> u8 {
		self as u8
	}

	/// True for the six scalar number kinds.
	pub const fn is_numeric(self) -> bool {
		self.is_integral() || self.is_floating()
	}

	/// True for `Byte`, `Short`, `Int` and `Long`.
	pub const fn is_integral(self) -> bool {
		matches!(self, Self::Byte | Self::Short | Self::Int | Self::Long)
	}

	/// True for `Float` and `Double`.
	pub const fn is_floating(self) -> bool {
		matches!(self, Self::Float | Self::Double)
	}

	/// Lowercase name used in error messages.
	pub const fn name(self) -> &'static str {
		match self {
			Self::End => "end",
			Self::Byte => "byte",
			Self::Short => "short",
			Self::Int => "int",
			Self::Long => "long",
			Self::Float => "float",
			Self::Double => "double",
			Self::ByteArray => "byte array",
			Self::String => "string",
			Self::List => "list",
			Self::Compound => "compound",
			Self::IntArray => "int array",
			Self::LongArray => "long array",
		}
	}
}

impl std::fmt::Display for TagKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}
