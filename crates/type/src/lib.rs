// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

pub mod error;
pub mod value;

pub use error::{Diagnostic, Error, IntoDiagnostic};
pub use value::{
	geometry::{Point2, Point3, Rect, ZRange},
	number::{format_float, parse_float, parse_leading_float},
	projection::Projection,
	r#type::{DATE_FIELD_SIZE, FieldType, GetFieldType, TEXT_FIELD_SIZE},
};

pub type Result<T> = std::result::Result<T, Error>;
