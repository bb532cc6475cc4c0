// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use geocloud_type::{FieldType, Result};

/// Indexed, typed access to one row of any table-like container.
pub trait TableRecord {
	fn field_count(&self) -> usize;

	fn field_type(&self, field: usize) -> Option<FieldType>;

	fn field_name(&self, field: usize) -> Option<&str>;

	fn as_f64(&self, field: usize) -> Option<f64>;

	fn as_string(&self, field: usize) -> Option<String>;

	fn is_selected(&self) -> bool;
}

/// A [`TableRecord`] that accepts writes.
pub trait TableRecordMut: TableRecord {
	fn set_f64(&mut self, field: usize, value: f64) -> Result<()>;

	fn set_string(&mut self, field: usize, value: &str) -> Result<()>;
}
