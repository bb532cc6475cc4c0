// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use super::FieldType;

/// Maps a native numeric type to the field type that stores it.
pub trait GetFieldType {
	fn field_type() -> FieldType;
}

impl GetFieldType for u8 {
	fn field_type() -> FieldType {
		FieldType::Uint1
	}
}

impl GetFieldType for i8 {
	fn field_type() -> FieldType {
		FieldType::Int1
	}
}

impl GetFieldType for u16 {
	fn field_type() -> FieldType {
		FieldType::Uint2
	}
}

impl GetFieldType for i16 {
	fn field_type() -> FieldType {
		FieldType::Int2
	}
}

impl GetFieldType for u32 {
	fn field_type() -> FieldType {
		FieldType::Uint4
	}
}

impl GetFieldType for i32 {
	fn field_type() -> FieldType {
		FieldType::Int4
	}
}

impl GetFieldType for u64 {
	fn field_type() -> FieldType {
		FieldType::Uint8
	}
}

impl GetFieldType for i64 {
	fn field_type() -> FieldType {
		FieldType::Int8
	}
}

impl GetFieldType for f32 {
	fn field_type() -> FieldType {
		FieldType::Float4
	}
}

impl GetFieldType for f64 {
	fn field_type() -> FieldType {
		FieldType::Float8
	}
}
