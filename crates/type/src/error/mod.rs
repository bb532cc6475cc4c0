// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

mod diagnostic;

pub use diagnostic::{Diagnostic, IntoDiagnostic};

use crate::value::r#type::FieldType;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("stream does not start with a point cloud signature")]
	InvalidSignature,

	#[error("record byte count {0} is smaller than three coordinates")]
	RecordSizeTooSmall(i32),

	#[error("record byte count {found} does not match the field layout ({expected} bytes)")]
	RecordSizeMismatch {
		expected: usize,
		found: usize,
	},

	#[error("field count {0} is smaller than the three coordinate fields")]
	FieldCountTooSmall(i32),

	#[error("field name length {0} is outside (0, 1024)")]
	InvalidNameLength(i32),

	#[error("field type code {0} cannot be stored in a point record")]
	UnsupportedType(i32),

	#[error("field {0} is a coordinate field and cannot be changed")]
	ReservedField(usize),

	#[error("field index {index} is out of range ({count} fields)")]
	FieldOutOfRange {
		index: usize,
		count: usize,
	},

	#[error("point index {index} is out of range ({count} points)")]
	PointOutOfRange {
		index: usize,
		count: usize,
	},

	#[error("field {index} cannot be moved to position {position}")]
	InvalidMove {
		index: usize,
		position: usize,
	},

	#[error("field name must not be empty")]
	InvalidFieldName,

	#[error("'{text}' is not a valid {field_type} value")]
	InvalidNumber {
		text: String,
		field_type: FieldType,
	},

	#[error("point cloud has no fields")]
	NoFields,

	#[error("no cursor is set")]
	NoCursor,

	#[error("allocation of {requested} bytes failed")]
	OutOfMemory {
		requested: usize,
	},

	#[error("operation cancelled")]
	Cancelled,

	#[error("archive does not contain a point data entry")]
	MissingDataEntry,

	#[error("archive error: {0}")]
	Archive(String),

	#[error("no file name to reload from")]
	NoFileName,

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Stable diagnostic code for the error.
	pub fn code(&self) -> &'static str {
		match self {
			Error::InvalidSignature => "PC_001",
			Error::RecordSizeTooSmall(_) => "PC_002",
			Error::RecordSizeMismatch {
				..
			} => "PC_003",
			Error::FieldCountTooSmall(_) => "PC_004",
			Error::InvalidNameLength(_) => "PC_005",
			Error::UnsupportedType(_) => "PC_006",
			Error::ReservedField(_) => "SCHEMA_001",
			Error::FieldOutOfRange {
				..
			} => "SCHEMA_002",
			Error::InvalidMove {
				..
			} => "SCHEMA_003",
			Error::InvalidFieldName => "SCHEMA_004",
			Error::PointOutOfRange {
				..
			} => "VALUE_001",
			Error::InvalidNumber {
				..
			} => "VALUE_002",
			Error::NoCursor => "VALUE_003",
			Error::NoFields => "ALLOC_001",
			Error::OutOfMemory {
				..
			} => "ALLOC_002",
			Error::Cancelled => "IO_001",
			Error::MissingDataEntry => "IO_002",
			Error::Archive(_) => "IO_003",
			Error::NoFileName => "IO_004",
			Error::Io(_) => "IO_005",
			Error::Json(_) => "IO_006",
		}
	}

	/// True for errors caused by malformed input rather than misuse.
	pub fn is_malformed_input(&self) -> bool {
		matches!(
			self,
			Error::InvalidSignature
				| Error::RecordSizeTooSmall(_)
				| Error::RecordSizeMismatch { .. }
				| Error::FieldCountTooSmall(_)
				| Error::InvalidNameLength(_)
				| Error::UnsupportedType(_)
				| Error::MissingDataEntry
		)
	}
}
