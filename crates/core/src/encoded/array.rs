// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use geocloud_type::{Error, Result};
use rayon::prelude::*;

use super::{layout::RecordLayout, record::Record};

/// Smallest capacity step of the record array.
pub const MIN_GROWTH: usize = 64;

/// Ordered, owned storage for all records of a point cloud.
#[derive(Debug, Clone, Default)]
pub struct RecordArray {
	records: Vec<Record>,
}

impl RecordArray {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.records.capacity()
	}

	/// Appends a zero filled record of the layout's width.
	pub fn append(&mut self, layout: &RecordLayout) -> Result<&mut Record> {
		if layout.field_count() == 0 {
			return Err(Error::NoFields);
		}

		let record = Record::zeroed(layout.record_size())?;
		self.push(record)
	}

	/// Appends an already built record.
	pub fn push(&mut self, record: Record) -> Result<&mut Record> {
		self.resize(self.records.len() + 1)?;
		self.records.push(record);
		let last = self.records.len() - 1;
		Ok(&mut self.records[last])
	}

	/// Drops the last record.
	pub fn truncate_last(&mut self) -> Option<Record> {
		let record = self.records.pop();
		self.release();
		record
	}

	/// Adjusts capacity for `count` records. Growth doubles the capacity in
	/// steps of at least [`MIN_GROWTH`]; capacity is released once `count`
	/// falls below a quarter of it. Never changes the record count.
	pub fn resize(&mut self, count: usize) -> Result<()> {
		let capacity = self.records.capacity();

		if count > capacity {
			let target = count.max(capacity.saturating_mul(2)).max(capacity + MIN_GROWTH);
			self.records.try_reserve_exact(target - self.records.len()).map_err(|_| Error::OutOfMemory {
				requested: target.saturating_mul(size_of::<Record>()),
			})?;
		} else {
			self.release_below(count);
		}

		Ok(())
	}

	/// Gives back capacity once the records fill less than a quarter of it.
	fn release(&mut self) {
		self.release_below(self.records.len());
	}

	fn release_below(&mut self, count: usize) {
		let capacity = self.records.capacity();
		if capacity > MIN_GROWTH && count < capacity / 4 {
			self.records.shrink_to(count.saturating_mul(2).max(MIN_GROWTH));
		}
	}

	pub fn remove(&mut self, index: usize) -> Option<Record> {
		if index >= self.records.len() {
			return None;
		}
		let record = self.records.remove(index);
		self.release();
		Some(record)
	}

	pub fn retain(&mut self, keep: impl FnMut(&Record) -> bool) {
		self.records.retain(keep);
		self.release();
	}

	pub fn clear(&mut self) {
		self.records = Vec::new();
	}

	pub fn get(&self, index: usize) -> Option<&Record> {
		self.records.get(index)
	}

	pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
		self.records.get_mut(index)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Record> {
		self.records.iter()
	}

	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
		self.records.iter_mut()
	}

	pub fn as_slice(&self) -> &[Record] {
		&self.records
	}

	pub fn as_mut_slice(&mut self) -> &mut [Record] {
		&mut self.records
	}

	/// Reserves `additional` bytes in every record. All or nothing: the
	/// first failure is returned, records already grown keep their content.
	pub fn reserve_each(&mut self, additional: usize) -> Result<()> {
		self.records.par_iter_mut().try_for_each(|record| record.reserve(additional))
	}
}

impl<'a> IntoIterator for &'a RecordArray {
	type Item = &'a Record;
	type IntoIter = std::slice::Iter<'a, Record>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.iter()
	}
}
