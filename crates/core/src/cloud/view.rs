// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use geocloud_type::{FieldType, Result};

use super::PointCloud;
use crate::interface::record::{TableRecord, TableRecordMut};

/// Read access to one point through the generic record contract.
#[derive(Debug, Clone, Copy)]
pub struct PointRecord<'a> {
	cloud: &'a PointCloud,
	point: usize,
}

impl PointRecord<'_> {
	pub fn index(&self) -> usize {
		self.point
	}
}

impl TableRecord for PointRecord<'_> {
	fn field_count(&self) -> usize {
		self.cloud.field_count()
	}

	fn field_type(&self, field: usize) -> Option<FieldType> {
		self.cloud.field_type(field)
	}

	fn field_name(&self, field: usize) -> Option<&str> {
		self.cloud.field_name(field)
	}

	fn as_f64(&self, field: usize) -> Option<f64> {
		self.cloud.get_value(self.point, field)
	}

	fn as_string(&self, field: usize) -> Option<String> {
		self.cloud.get_string(self.point, field)
	}

	fn is_selected(&self) -> bool {
		self.cloud.is_selected(self.point)
	}
}

/// Write access to one point through the generic record contract.
#[derive(Debug)]
pub struct PointRecordMut<'a> {
	cloud: &'a mut PointCloud,
	point: usize,
}

impl PointRecordMut<'_> {
	pub fn index(&self) -> usize {
		self.point
	}
}

impl TableRecord for PointRecordMut<'_> {
	fn field_count(&self) -> usize {
		self.cloud.field_count()
	}

	fn field_type(&self, field: usize) -> Option<FieldType> {
		self.cloud.field_type(field)
	}

	fn field_name(&self, field: usize) -> Option<&str> {
		self.cloud.field_name(field)
	}

	fn as_f64(&self, field: usize) -> Option<f64> {
		self.cloud.get_value(self.point, field)
	}

	fn as_string(&self, field: usize) -> Option<String> {
		self.cloud.get_string(self.point, field)
	}

	fn is_selected(&self) -> bool {
		self.cloud.is_selected(self.point)
	}
}

impl TableRecordMut for PointRecordMut<'_> {
	fn set_f64(&mut self, field: usize, value: f64) -> Result<()> {
		self.cloud.set_value(self.point, field, value)
	}

	fn set_string(&mut self, field: usize, value: &str) -> Result<()> {
		self.cloud.set_string(self.point, field, value)
	}
}

impl PointCloud {
	pub fn record(&self, point: usize) -> Option<PointRecord<'_>> {
		(point < self.point_count()).then_some(PointRecord {
			cloud: self,
			point,
		})
	}

	pub fn record_mut(&mut self, point: usize) -> Option<PointRecordMut<'_>> {
		(point < self.point_count()).then_some(PointRecordMut {
			cloud: self,
			point,
		})
	}

	/// The point under the cursor as a generic record.
	pub fn cursor_record(&self) -> Option<PointRecord<'_>> {
		self.record(self.cursor?)
	}

	/// Appends a point copying every field whose type matches the field at
	/// the same index in `source`. Other fields stay zero.
	pub fn add_record(&mut self, source: &dyn TableRecord) -> Result<usize> {
		let point = self.add_point(0.0, 0.0, 0.0)?;

		for field in 0..self.field_count().min(source.field_count()) {
			let Some(field_type) = self.field_type(field) else {
				continue;
			};
			if source.field_type(field) != Some(field_type) {
				continue;
			}

			if field_type.is_textual() {
				if let Some(value) = source.as_string(field) {
					self.set_string(point, field, &value)?;
				}
			} else if let Some(value) = source.as_f64(field) {
				self.set_value(point, field, value)?;
			}
		}

		Ok(point)
	}
}

#[cfg(test)]
pub mod tests {
	use geocloud_type::{FieldType, Point3};

	use crate::{
		PointCloud,
		cloud::tests::grid,
		interface::record::{TableRecord, TableRecordMut},
	};

	#[test]
	fn test_record_view() {
		let mut cloud = grid(2);
		cloud.add_field("label", FieldType::Text, None).unwrap();
		cloud.set_string(3, 3, "roof").unwrap();
		cloud.select(3, false).unwrap();

		let record = cloud.record(3).unwrap();
		assert_eq!(record.field_count(), 4);
		assert_eq!(record.field_name(3), Some("label"));
		assert_eq!(record.field_type(0), Some(FieldType::Float8));
		assert_eq!(record.as_f64(0), Some(1.0));
		assert_eq!(record.as_string(3).as_deref(), Some("roof"));
		assert!(record.is_selected());

		assert!(cloud.record(4).is_none());
	}

	#[test]
	fn test_record_mut_writes_through() {
		let mut cloud = grid(2);
		{
			let mut record = cloud.record_mut(0).unwrap();
			record.set_f64(2, 12.0).unwrap();
			assert!(record.set_string(0, "abc").is_err());
		}
		assert_eq!(cloud.get_z(0), 12.0);
	}

	#[test]
	fn test_add_record_copies_matching_fields() {
		let mut source = grid(2);
		source.add_field("class", FieldType::Uint1, None).unwrap();
		source.add_field("label", FieldType::Text, None).unwrap();
		source.set_value(1, 3, 5.0).unwrap();
		source.set_string(1, 4, "tree").unwrap();

		let mut target = PointCloud::new();
		target.add_field("class", FieldType::Int4, None).unwrap();
		target.add_field("label", FieldType::Text, None).unwrap();

		let record = source.record(1).unwrap();
		let point = target.add_record(&record).unwrap();

		assert_eq!(target.get_point(point), Some(Point3::new(1.0, 0.0, 1.0)));
		assert_eq!(target.get_value(point, 3), Some(0.0));
		assert_eq!(target.get_string(point, 4).as_deref(), Some("tree"));
	}

	#[test]
	fn test_cursor_record() {
		let mut cloud = grid(2);
		cloud.set_cursor(2).unwrap();
		assert_eq!(cloud.cursor_record().unwrap().index(), 2);
	}
}
