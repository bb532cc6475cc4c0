// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

//! In place schema changes.
//!
//! Every change updates the descriptors and the layout first, then migrates
//! the bytes of every record to the new layout in parallel. Record capacity
//! is reserved before anything is touched so a failed allocation leaves the
//! schema and the records as they were.

use geocloud_type::{Error, FieldType, Result};
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::{COORDINATE_FIELDS, FieldDescriptor, Schema};
use crate::encoded::{array::RecordArray, codec::convert_within};

/// Inserts a zero filled field and returns its final index.
///
/// `position` past the end (or `None`) appends. Once the coordinate fields
/// exist, positions in front of them are moved behind them.
#[instrument(name = "pointcloud::schema::add_field", level = "debug", skip(schema, records))]
pub fn add_field(
	schema: &mut Schema,
	records: &mut RecordArray,
	name: &str,
	field_type: FieldType,
	position: Option<usize>,
) -> Result<usize> {
	if name.is_empty() {
		return Err(Error::InvalidFieldName);
	}

	let count = schema.len();
	let mut position = position.unwrap_or(count).min(count);
	if count >= COORDINATE_FIELDS {
		position = position.max(COORDINATE_FIELDS);
	}

	let size = field_type.size();
	records.reserve_each(size)?;

	schema.insert_descriptor(position, FieldDescriptor::new(name, field_type));
	let offset = schema.fields()[position].offset;

	records.as_mut_slice().par_iter_mut().for_each(|record| record.insert_zeroed(offset, size));

	debug!(position, offset, record_size = schema.record_size(), "field added");
	Ok(position)
}

/// Removes an attribute field and its bytes from every record.
#[instrument(name = "pointcloud::schema::delete_field", level = "debug", skip(schema, records))]
pub fn delete_field(schema: &mut Schema, records: &mut RecordArray, index: usize) -> Result<FieldDescriptor> {
	check_attribute(schema, index)?;

	let offset = schema.fields()[index].offset;
	let size = schema.fields()[index].size();
	let descriptor = schema.remove_descriptor(index);

	records.as_mut_slice().par_iter_mut().for_each(|record| record.remove_range(offset, size));

	debug!(record_size = schema.record_size(), "field deleted");
	Ok(descriptor)
}

/// Moves an attribute field so it ends up at `position`, clamped to the
/// attribute range. Values travel with the field.
#[instrument(name = "pointcloud::schema::move_field", level = "debug", skip(schema, records))]
pub fn move_field(schema: &mut Schema, records: &mut RecordArray, index: usize, position: usize) -> Result<usize> {
	check_attribute(schema, index)?;

	let last = schema.len() - 1;
	let position = position.clamp(COORDINATE_FIELDS, last);
	if position == index {
		return Err(Error::InvalidMove {
			index,
			position,
		});
	}

	let size = schema.fields()[index].size();
	let (start, end, rotate_left) = if position > index {
		(schema.fields()[index].offset, schema.fields()[position].offset + schema.fields()[position].size(), true)
	} else {
		(schema.fields()[position].offset, schema.fields()[index].offset + size, false)
	};

	let descriptor = schema.remove_descriptor(index);
	schema.insert_descriptor(position, descriptor);

	records.as_mut_slice().par_iter_mut().for_each(|record| {
		let bytes = &mut record.make_mut()[start..end];
		if rotate_left {
			bytes.rotate_left(size);
		} else {
			bytes.rotate_right(size);
		}
	});

	debug!(position, "field moved");
	Ok(position)
}

/// Changes the type of an attribute field, converting every value.
/// Numbers convert through `f64`, text reaches numbers through its leading
/// decimal number, text to text keeps the raw bytes.
#[instrument(name = "pointcloud::schema::retype_field", level = "debug", skip(schema, records))]
pub fn retype_field(schema: &mut Schema, records: &mut RecordArray, index: usize, field_type: FieldType) -> Result<()> {
	check_attribute(schema, index)?;

	if schema.fields()[index].field_type == field_type {
		return Ok(());
	}

	let name = schema.fields()[index].name.clone();
	add_field(schema, records, &name, field_type, Some(index))?;

	let to = schema.layout().slots()[index];
	let from = schema.layout().slots()[index + 1];
	records.as_mut_slice().par_iter_mut().for_each(|record| convert_within(&from, &to, record.make_mut()));

	delete_field(schema, records, index + 1)?;
	Ok(())
}

pub fn rename_field(schema: &mut Schema, index: usize, name: &str) -> Result<()> {
	check_attribute(schema, index)?;
	if name.is_empty() {
		return Err(Error::InvalidFieldName);
	}

	if let Some(field) = schema.field_mut(index) {
		field.name = name.to_string();
	}
	Ok(())
}

fn check_attribute(schema: &Schema, index: usize) -> Result<()> {
	if index >= schema.len() {
		return Err(Error::FieldOutOfRange {
			index,
			count: schema.len(),
		});
	}
	if index < COORDINATE_FIELDS {
		return Err(Error::ReservedField(index));
	}
	Ok(())
}
