// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::ops::Deref;

use geocloud_type::{Error, Result};

use super::layout::{CONTROL_BYTES, FLAG_MODIFIED, FLAG_SELECTED};

/// One packed point: [control byte]:[field values]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(Vec<u8>);

impl Deref for Record {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Record {
	/// Allocates a zero filled record of `size` bytes, control byte included.
	pub fn zeroed(size: usize) -> Result<Self> {
		let mut bytes = Vec::new();
		bytes.try_reserve_exact(size).map_err(|_| Error::OutOfMemory {
			requested: size,
		})?;
		bytes.resize(size, 0);
		Ok(Self(bytes))
	}

	/// Builds a record from persisted field bytes (everything after the
	/// control byte). Flags start cleared.
	pub fn from_data(data: &[u8]) -> Result<Self> {
		let mut record = Self::zeroed(data.len() + CONTROL_BYTES)?;
		record.0[CONTROL_BYTES..].copy_from_slice(data);
		Ok(record)
	}

	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	pub fn make_mut(&mut self) -> &mut [u8] {
		&mut self.0
	}

	/// Field bytes without the control byte.
	pub fn data(&self) -> &[u8] {
		&self.0[CONTROL_BYTES..]
	}

	pub fn data_mut(&mut self) -> &mut [u8] {
		&mut self.0[CONTROL_BYTES..]
	}

	#[inline]
	pub fn flags(&self) -> u8 {
		self.0[0]
	}

	#[inline]
	pub fn is_selected(&self) -> bool {
		self.flags() & FLAG_SELECTED != 0
	}

	#[inline]
	pub fn is_modified(&self) -> bool {
		self.flags() & FLAG_MODIFIED != 0
	}

	pub fn set_selected(&mut self, selected: bool) {
		self.set_flag(FLAG_SELECTED, selected);
	}

	pub fn set_modified(&mut self, modified: bool) {
		self.set_flag(FLAG_MODIFIED, modified);
	}

	fn set_flag(&mut self, flag: u8, on: bool) {
		if on {
			self.0[0] |= flag;
		} else {
			self.0[0] &= !flag;
		}
	}

	/// Makes room for `additional` bytes without touching the content.
	pub fn reserve(&mut self, additional: usize) -> Result<()> {
		self.0.try_reserve_exact(additional).map_err(|_| Error::OutOfMemory {
			requested: self.0.len() + additional,
		})
	}

	/// Inserts `size` zero bytes at `offset`, shifting the tail right.
	/// Call [`Record::reserve`] first when the growth must not fail.
	pub fn insert_zeroed(&mut self, offset: usize, size: usize) {
		let old_len = self.0.len();
		debug_assert!(offset <= old_len);
		self.0.resize(old_len + size, 0);
		self.0.copy_within(offset..old_len, offset + size);
		self.0[offset..offset + size].fill(0);
	}

	/// Removes `size` bytes at `offset`, shifting the tail left.
	pub fn remove_range(&mut self, offset: usize, size: usize) {
		debug_assert!(offset + size <= self.0.len());
		let old_len = self.0.len();
		self.0.copy_within(offset + size..old_len, offset);
		self.0.truncate(old_len - size);
		self.0.shrink_to_fit();
	}
}
