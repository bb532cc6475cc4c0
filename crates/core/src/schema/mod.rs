// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use geocloud_type::FieldType;

use crate::{encoded::layout::RecordLayout, statistics::StatisticsCache};

pub mod evolution;

/// Fields 0, 1 and 2 hold X, Y and Z.
pub const COORDINATE_FIELDS: usize = 3;

pub const COORDINATE_NAMES: [&str; COORDINATE_FIELDS] = ["X", "Y", "Z"];

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	pub name: String,
	pub field_type: FieldType,
	/// byte offset inside a record, the control byte included
	pub offset: usize,
	pub statistics: StatisticsCache,
}

impl FieldDescriptor {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			offset: 0,
			statistics: StatisticsCache::new(),
		}
	}

	pub fn size(&self) -> usize {
		self.field_type.size()
	}
}

/// Ordered field descriptors of a point cloud and the packed layout they
/// produce. The layout is recomputed on every structural change.
#[derive(Debug, Clone, Default)]
pub struct Schema {
	fields: Vec<FieldDescriptor>,
	layout: RecordLayout,
}

impl Schema {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
		self.fields.get(index)
	}

	pub fn field_mut(&mut self, index: usize) -> Option<&mut FieldDescriptor> {
		self.fields.get_mut(index)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn layout(&self) -> &RecordLayout {
		&self.layout
	}

	pub fn record_size(&self) -> usize {
		self.layout.record_size()
	}

	/// Index of the first field called `name`, ignoring ASCII case.
	pub fn field_index(&self, name: &str) -> Option<usize> {
		self.fields.iter().position(|field| field.name.eq_ignore_ascii_case(name))
	}

	/// Same field count and the same type at every index.
	pub fn is_compatible(&self, other: &Schema) -> bool {
		self.fields.len() == other.fields.len()
			&& self.fields.iter().zip(other.fields.iter()).all(|(a, b)| a.field_type == b.field_type)
	}

	pub fn invalidate(&mut self, index: usize) {
		if let Some(field) = self.fields.get_mut(index) {
			field.statistics.invalidate();
		}
	}

	pub fn invalidate_all(&mut self) {
		for field in &mut self.fields {
			field.statistics.invalidate();
		}
	}

	pub fn clear(&mut self) {
		self.fields.clear();
		self.relayout();
	}

	pub(crate) fn insert_descriptor(&mut self, position: usize, descriptor: FieldDescriptor) {
		self.fields.insert(position, descriptor);
		self.relayout();
	}

	pub(crate) fn remove_descriptor(&mut self, index: usize) -> FieldDescriptor {
		let descriptor = self.fields.remove(index);
		self.relayout();
		descriptor
	}

	fn relayout(&mut self) {
		let types: Vec<FieldType> = self.fields.iter().map(|field| field.field_type).collect();
		self.layout = RecordLayout::new(&types);
		for (field, slot) in self.fields.iter_mut().zip(self.layout.slots()) {
			field.offset = slot.offset;
		}
	}
}
