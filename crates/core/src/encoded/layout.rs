// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use geocloud_type::FieldType;

/// Bytes in front of the first field of every record.
pub const CONTROL_BYTES: usize = 1;

/// Control byte bit set when a record was written to.
pub const FLAG_MODIFIED: u8 = 0x01;
/// Control byte bit set while a record is part of the selection.
pub const FLAG_SELECTED: u8 = 0x02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
	pub offset: usize,
	pub size: usize,
	pub field_type: FieldType,
}

impl FieldSlot {
	pub const fn end(&self) -> usize {
		self.offset + self.size
	}
}

/// Byte offsets of each field inside a packed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
	slots: Vec<FieldSlot>,
	/// size of the whole record including the control byte
	record_size: usize,
}

impl Default for RecordLayout {
	fn default() -> Self {
		Self::new(&[])
	}
}

impl RecordLayout {
	pub fn new(types: &[FieldType]) -> Self {
		let mut offset = CONTROL_BYTES;
		let mut slots = Vec::with_capacity(types.len());

		for &field_type in types {
			let size = field_type.size();
			slots.push(FieldSlot {
				offset,
				size,
				field_type,
			});
			offset += size;
		}

		Self {
			slots,
			record_size: offset,
		}
	}

	pub fn slots(&self) -> &[FieldSlot] {
		&self.slots
	}

	pub fn slot(&self, index: usize) -> Option<&FieldSlot> {
		self.slots.get(index)
	}

	pub fn field_count(&self) -> usize {
		self.slots.len()
	}

	pub const fn record_size(&self) -> usize {
		self.record_size
	}

	/// Record size as persisted, without the control byte.
	pub const fn data_size(&self) -> usize {
		self.record_size - CONTROL_BYTES
	}

	pub fn types(&self) -> impl Iterator<Item = FieldType> + '_ {
		self.slots.iter().map(|slot| slot.field_type)
	}
}
