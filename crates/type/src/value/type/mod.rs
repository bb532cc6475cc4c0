// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

mod get;

pub use get::GetFieldType;

/// Bytes reserved in a record for a text field, regardless of content.
pub const TEXT_FIELD_SIZE: usize = 32;
/// Bytes reserved in a record for a date field, regardless of content.
pub const DATE_FIELD_SIZE: usize = 32;

/// Scalar type of a point cloud field.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldType {
	/// A 1-byte unsigned integer
	Uint1,
	/// A 1-byte signed integer
	Int1,
	/// A 2-byte unsigned integer
	Uint2,
	/// A 2-byte signed integer
	Int2,
	/// A 4-byte unsigned integer
	Uint4,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte unsigned integer
	Uint8,
	/// An 8-byte signed integer
	Int8,
	/// A 4-byte floating point
	Float4,
	/// An 8-byte floating point
	Float8,
	/// Fixed-length text
	Text,
	/// Fixed-length date, stored as text
	Date,
}

impl FieldType {
	pub const ALL: [FieldType; 12] = [
		FieldType::Uint1,
		FieldType::Int1,
		FieldType::Uint2,
		FieldType::Int2,
		FieldType::Uint4,
		FieldType::Int4,
		FieldType::Uint8,
		FieldType::Int8,
		FieldType::Float4,
		FieldType::Float8,
		FieldType::Text,
		FieldType::Date,
	];

	pub fn is_numeric(&self) -> bool {
		!self.is_textual()
	}

	pub fn is_textual(&self) -> bool {
		matches!(self, FieldType::Text | FieldType::Date)
	}

	pub fn is_signed_integer(&self) -> bool {
		matches!(self, FieldType::Int1 | FieldType::Int2 | FieldType::Int4 | FieldType::Int8)
	}

	pub fn is_unsigned_integer(&self) -> bool {
		matches!(self, FieldType::Uint1 | FieldType::Uint2 | FieldType::Uint4 | FieldType::Uint8)
	}

	pub fn is_integer(&self) -> bool {
		self.is_signed_integer() || self.is_unsigned_integer()
	}

	pub fn is_floating_point(&self) -> bool {
		matches!(self, FieldType::Float4 | FieldType::Float8)
	}

	/// Number of bytes a value of this type occupies in a packed record.
	pub const fn size(&self) -> usize {
		match self {
			FieldType::Uint1 => 1,
			FieldType::Int1 => 1,
			FieldType::Uint2 => 2,
			FieldType::Int2 => 2,
			FieldType::Uint4 => 4,
			FieldType::Int4 => 4,
			FieldType::Uint8 => 8,
			FieldType::Int8 => 8,
			FieldType::Float4 => 4,
			FieldType::Float8 => 8,
			FieldType::Text => TEXT_FIELD_SIZE,
			FieldType::Date => DATE_FIELD_SIZE,
		}
	}
}

impl FieldType {
	/// Type code as persisted in the data file schema.
	pub fn to_code(&self) -> i32 {
		match self {
			FieldType::Uint1 => 1,
			FieldType::Int1 => 2,
			FieldType::Uint2 => 3,
			FieldType::Int2 => 4,
			FieldType::Uint4 => 5,
			FieldType::Int4 => 6,
			FieldType::Uint8 => 7,
			FieldType::Int8 => 8,
			FieldType::Float4 => 9,
			FieldType::Float8 => 10,
			FieldType::Text => 11,
			FieldType::Date => 12,
		}
	}

	/// Codes 0 (bit), 13 (color), 14 (binary) and 15 (undefined) exist in
	/// the wider type enum but cannot be stored in a point record.
	pub fn from_code(code: i32) -> Option<Self> {
		match code {
			1 => Some(FieldType::Uint1),
			2 => Some(FieldType::Int1),
			3 => Some(FieldType::Uint2),
			4 => Some(FieldType::Int2),
			5 => Some(FieldType::Uint4),
			6 => Some(FieldType::Int4),
			7 => Some(FieldType::Uint8),
			8 => Some(FieldType::Int8),
			9 => Some(FieldType::Float4),
			10 => Some(FieldType::Float8),
			11 => Some(FieldType::Text),
			12 => Some(FieldType::Date),
			_ => None,
		}
	}

	/// Type codes written by the first revision of the data file format.
	pub fn from_legacy_code(code: i32) -> Option<Self> {
		match code {
			1 => Some(FieldType::Int1),
			2 => Some(FieldType::Int2),
			3 => Some(FieldType::Int4),
			4 => Some(FieldType::Int8),
			5 => Some(FieldType::Float4),
			6 => Some(FieldType::Float8),
			_ => None,
		}
	}
}

impl FieldType {
	/// Identifier used in the header side-file.
	pub fn identifier(&self) -> &'static str {
		match self {
			FieldType::Uint1 => "BYTE_UNSIGNED",
			FieldType::Int1 => "BYTE",
			FieldType::Uint2 => "SHORTINT_UNSIGNED",
			FieldType::Int2 => "SHORTINT",
			FieldType::Uint4 => "INTEGER_UNSIGNED",
			FieldType::Int4 => "INTEGER",
			FieldType::Uint8 => "LONGINT_UNSIGNED",
			FieldType::Int8 => "LONGINT",
			FieldType::Float4 => "FLOAT",
			FieldType::Float8 => "DOUBLE",
			FieldType::Text => "STRING",
			FieldType::Date => "DATE",
		}
	}
}

impl Display for FieldType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FieldType::Uint1 => f.write_str("Uint1"),
			FieldType::Int1 => f.write_str("Int1"),
			FieldType::Uint2 => f.write_str("Uint2"),
			FieldType::Int2 => f.write_str("Int2"),
			FieldType::Uint4 => f.write_str("Uint4"),
			FieldType::Int4 => f.write_str("Int4"),
			FieldType::Uint8 => f.write_str("Uint8"),
			FieldType::Int8 => f.write_str("Int8"),
			FieldType::Float4 => f.write_str("Float4"),
			FieldType::Float8 => f.write_str("Float8"),
			FieldType::Text => f.write_str("Text"),
			FieldType::Date => f.write_str("Date"),
		}
	}
}

impl FromStr for FieldType {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_uppercase().as_str() {
			"UINT1" | "BYTE_UNSIGNED" => Ok(FieldType::Uint1),
			"INT1" | "BYTE" => Ok(FieldType::Int1),
			"UINT2" | "SHORTINT_UNSIGNED" => Ok(FieldType::Uint2),
			"INT2" | "SHORTINT" => Ok(FieldType::Int2),
			"UINT4" | "INTEGER_UNSIGNED" => Ok(FieldType::Uint4),
			"INT4" | "INTEGER" => Ok(FieldType::Int4),
			"UINT8" | "LONGINT_UNSIGNED" => Ok(FieldType::Uint8),
			"INT8" | "LONGINT" => Ok(FieldType::Int8),
			"FLOAT4" | "FLOAT" => Ok(FieldType::Float4),
			"FLOAT8" | "DOUBLE" => Ok(FieldType::Float8),
			"TEXT" | "STRING" | "UTF8" => Ok(FieldType::Text),
			"DATE" => Ok(FieldType::Date),
			_ => Err(()),
		}
	}
}
