// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::path::{Path, PathBuf};

use geocloud_type::{Error, FieldType, Point3, Projection, Result};
use tracing::{debug, instrument};

use crate::{
	config::PointCloudConfig,
	encoded::{array::RecordArray, layout::RecordLayout, record::Record},
	schema::{COORDINATE_FIELDS, COORDINATE_NAMES, FieldDescriptor, Schema, evolution},
};

mod extent;
mod metadata;
mod selection;
mod view;

pub use extent::Extent;
pub use metadata::Metadata;
pub use view::{PointRecord, PointRecordMut};

/// A set of points sharing one runtime defined list of fields.
///
/// Fields 0, 1 and 2 always hold the X, Y and Z coordinates; attributes
/// follow at index 3 and above. Every point is a packed [`Record`].
#[derive(Debug, Clone)]
pub struct PointCloud {
	schema: Schema,
	records: RecordArray,
	config: PointCloudConfig,
	cursor: Option<usize>,
	selection: Vec<usize>,
	metadata: Metadata,
	projection: Projection,
	modified: bool,
	file_name: Option<PathBuf>,
}

impl Default for PointCloud {
	fn default() -> Self {
		Self::new()
	}
}

impl PointCloud {
	/// An empty point cloud holding only the coordinate fields.
	pub fn new() -> Self {
		Self::with_config(PointCloudConfig::default())
	}

	pub fn with_config(config: PointCloudConfig) -> Self {
		let mut cloud = Self::without_fields(config);
		cloud.create_coordinates();
		cloud.modified = false;
		cloud
	}

	/// Same fields as `structure`, no points.
	pub fn from_structure(structure: &PointCloud) -> Self {
		let mut cloud = Self::without_fields(structure.config);
		for field in structure.schema.fields() {
			cloud.schema.insert_descriptor(cloud.schema.len(), FieldDescriptor::new(field.name.clone(), field.field_type));
		}
		cloud
	}

	/// Builds an empty point cloud from a complete field list, as found in a
	/// data file. The first three fields become the coordinates.
	pub fn from_fields(fields: &[(String, FieldType)], config: PointCloudConfig) -> Result<Self> {
		if fields.len() < COORDINATE_FIELDS {
			return Err(Error::FieldCountTooSmall(fields.len() as i32));
		}
		if let Some((_, textual)) = fields[..COORDINATE_FIELDS].iter().find(|(_, ty)| ty.is_textual()) {
			return Err(Error::UnsupportedType(textual.to_code()));
		}

		let mut cloud = Self::without_fields(config);
		for (name, field_type) in fields {
			cloud.schema.insert_descriptor(cloud.schema.len(), FieldDescriptor::new(name.clone(), *field_type));
		}
		Ok(cloud)
	}

	fn without_fields(config: PointCloudConfig) -> Self {
		Self {
			schema: Schema::new(),
			records: RecordArray::new(),
			config,
			cursor: None,
			selection: Vec::new(),
			metadata: Metadata::default(),
			projection: Projection::default(),
			modified: false,
			file_name: None,
		}
	}

	fn coordinate_type(&self) -> FieldType {
		if self.config.double_precision_coordinates {
			FieldType::Float8
		} else {
			FieldType::Float4
		}
	}

	fn create_coordinates(&mut self) {
		let field_type = self.coordinate_type();
		while self.schema.len() < COORDINATE_FIELDS {
			let name = COORDINATE_NAMES[self.schema.len()];
			self.schema.insert_descriptor(self.schema.len(), FieldDescriptor::new(name, field_type));
		}
		self.modified = true;
	}

	/// Drops all points and fields, then recreates the coordinate fields.
	pub fn create(&mut self) {
		self.destroy();
		self.create_coordinates();
	}

	/// Drops all points and fields. Points cannot be added until fields
	/// exist again.
	pub fn destroy(&mut self) {
		self.del_points();
		self.schema.clear();
		self.modified = true;
	}

	/// Same field count and the same type at every index.
	pub fn is_compatible(&self, other: &PointCloud) -> bool {
		self.schema.is_compatible(&other.schema)
	}
}

impl PointCloud {
	pub fn config(&self) -> &PointCloudConfig {
		&self.config
	}

	pub fn no_data_value(&self) -> f64 {
		self.config.no_data_value
	}

	pub fn set_no_data(&mut self, value: f64) {
		if self.config.no_data_value != value {
			self.config.no_data_value = value;
			self.invalidate_attributes();
		}
	}

	pub fn is_no_data(&self, value: f64) -> bool {
		value.is_nan() || value == self.config.no_data_value
	}

	pub fn max_samples(&self) -> usize {
		self.config.max_samples
	}

	pub fn set_max_samples(&mut self, max_samples: usize) {
		if self.config.max_samples != max_samples {
			self.config.max_samples = max_samples;
			self.invalidate_attributes();
		}
	}

	pub fn name(&self) -> &str {
		&self.metadata.name
	}

	pub fn set_name(&mut self, name: impl Into<String>) {
		self.metadata.name = name.into();
	}

	pub fn metadata(&self) -> &Metadata {
		&self.metadata
	}

	pub fn metadata_mut(&mut self) -> &mut Metadata {
		&mut self.metadata
	}

	pub fn projection(&self) -> &Projection {
		&self.projection
	}

	pub fn projection_mut(&mut self) -> &mut Projection {
		&mut self.projection
	}

	pub fn is_modified(&self) -> bool {
		self.modified
	}

	pub fn set_modified(&mut self, modified: bool) {
		self.modified = modified;
	}

	/// Path this point cloud was last loaded from or saved to.
	pub fn file_name(&self) -> Option<&Path> {
		self.file_name.as_deref()
	}

	pub fn set_file_name(&mut self, path: impl Into<PathBuf>) {
		self.file_name = Some(path.into());
	}
}

impl PointCloud {
	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn layout(&self) -> &RecordLayout {
		self.schema.layout()
	}

	pub fn field_count(&self) -> usize {
		self.schema.len()
	}

	pub fn fields(&self) -> &[FieldDescriptor] {
		self.schema.fields()
	}

	pub fn field_name(&self, field: usize) -> Option<&str> {
		self.schema.field(field).map(|f| f.name.as_str())
	}

	pub fn field_type(&self, field: usize) -> Option<FieldType> {
		self.schema.field(field).map(|f| f.field_type)
	}

	pub fn field_index(&self, name: &str) -> Option<usize> {
		self.schema.field_index(name)
	}

	/// Adds an attribute field and returns its index. Missing coordinate
	/// fields are created first.
	pub fn add_field(&mut self, name: &str, field_type: FieldType, position: Option<usize>) -> Result<usize> {
		if self.schema.len() < COORDINATE_FIELDS {
			if !self.records.is_empty() {
				self.del_points();
			}
			self.create_coordinates();
		}

		let index = evolution::add_field(&mut self.schema, &mut self.records, name, field_type, position)?;
		self.modified = true;
		Ok(index)
	}

	pub fn del_field(&mut self, field: usize) -> Result<()> {
		evolution::delete_field(&mut self.schema, &mut self.records, field)?;
		self.modified = true;
		Ok(())
	}

	/// Moves an attribute field and returns the index it ended up at.
	pub fn move_field(&mut self, field: usize, position: usize) -> Result<usize> {
		let index = evolution::move_field(&mut self.schema, &mut self.records, field, position)?;
		self.modified = true;
		Ok(index)
	}

	pub fn set_field_type(&mut self, field: usize, field_type: FieldType) -> Result<()> {
		if self.field_type(field) == Some(field_type) && field >= COORDINATE_FIELDS {
			return Ok(());
		}
		evolution::retype_field(&mut self.schema, &mut self.records, field, field_type)?;
		self.modified = true;
		Ok(())
	}

	pub fn set_field_name(&mut self, field: usize, name: &str) -> Result<()> {
		evolution::rename_field(&mut self.schema, field, name)?;
		self.modified = true;
		Ok(())
	}
}

impl PointCloud {
	pub fn point_count(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn records(&self) -> &RecordArray {
		&self.records
	}

	/// Appends a point and makes it the cursor. Attributes start zeroed.
	pub fn add_point(&mut self, x: f64, y: f64, z: f64) -> Result<usize> {
		let layout = self.schema.layout();
		let record = self.records.append(layout)?;
		layout.set_f64(record, 0, x)?;
		layout.set_f64(record, 1, y)?;
		layout.set_f64(record, 2, z)?;

		let index = self.records.len() - 1;
		self.on_points_changed();
		self.cursor = Some(index);
		Ok(index)
	}

	/// Appends a point from the persisted field bytes of one record.
	pub fn append_raw(&mut self, data: &[u8]) -> Result<()> {
		let expected = self.schema.layout().data_size();
		if data.len() != expected || self.schema.is_empty() {
			return Err(Error::RecordSizeMismatch {
				expected,
				found: data.len(),
			});
		}

		self.records.push(Record::from_data(data)?)?;
		self.on_points_changed();
		Ok(())
	}

	/// Persisted field bytes of one point.
	pub fn record_data(&self, point: usize) -> Option<&[u8]> {
		self.records.get(point).map(Record::data)
	}

	/// Removes a point. Selection and cursor keep pointing at the same
	/// remaining points.
	pub fn del_point(&mut self, point: usize) -> Result<()> {
		self.records.remove(point).ok_or(Error::PointOutOfRange {
			index: point,
			count: self.records.len(),
		})?;

		self.selection.retain(|&selected| selected != point);
		for selected in &mut self.selection {
			if *selected > point {
				*selected -= 1;
			}
		}

		self.cursor = match self.cursor {
			Some(cursor) if cursor == point => None,
			Some(cursor) if cursor > point => Some(cursor - 1),
			cursor => cursor,
		};

		self.on_points_changed();
		Ok(())
	}

	/// Removes every point, keeping the fields.
	#[instrument(name = "pointcloud::del_points", level = "debug", skip(self), fields(points = self.records.len()))]
	pub fn del_points(&mut self) {
		self.records.clear();
		self.selection.clear();
		self.cursor = None;
		self.on_points_changed();
	}

	/// Reserves room for `additional` more points.
	pub fn reserve(&mut self, additional: usize) -> Result<()> {
		self.records.resize(self.records.len() + additional)
	}

	pub fn get_point(&self, point: usize) -> Option<Point3> {
		let record = self.records.get(point)?;
		let layout = self.schema.layout();
		Some(Point3::new(
			layout.get_f64(record, 0)?,
			layout.get_f64(record, 1)?,
			layout.get_f64(record, 2)?,
		))
	}

	pub fn set_point(&mut self, point: usize, position: Point3) -> Result<()> {
		self.set_value(point, 0, position.x)?;
		self.set_value(point, 1, position.y)?;
		self.set_value(point, 2, position.z)
	}

	pub fn get_x(&self, point: usize) -> f64 {
		self.get_value(point, 0).unwrap_or_default()
	}

	pub fn get_y(&self, point: usize) -> f64 {
		self.get_value(point, 1).unwrap_or_default()
	}

	pub fn get_z(&self, point: usize) -> f64 {
		self.get_value(point, 2).unwrap_or_default()
	}

	pub fn get_value(&self, point: usize, field: usize) -> Option<f64> {
		self.schema.layout().get_f64(self.records.get(point)?, field)
	}

	pub fn get_string(&self, point: usize, field: usize) -> Option<String> {
		self.schema.layout().get_string(self.records.get(point)?, field)
	}

	pub fn set_value(&mut self, point: usize, field: usize, value: f64) -> Result<()> {
		let count = self.records.len();
		let record = self.records.get_mut(point).ok_or(Error::PointOutOfRange {
			index: point,
			count,
		})?;
		self.schema.layout().set_f64(record, field, value)?;
		self.on_value_changed(field);
		Ok(())
	}

	pub fn set_string(&mut self, point: usize, field: usize, value: &str) -> Result<()> {
		let count = self.records.len();
		let record = self.records.get_mut(point).ok_or(Error::PointOutOfRange {
			index: point,
			count,
		})?;
		self.schema.layout().set_str(record, field, value)?;
		self.on_value_changed(field);
		Ok(())
	}

	/// Value of attribute `attribute`, counted from the first field after
	/// the coordinates.
	pub fn get_attribute(&self, point: usize, attribute: usize) -> Option<f64> {
		self.get_value(point, attribute + COORDINATE_FIELDS)
	}

	pub fn get_attribute_string(&self, point: usize, attribute: usize) -> Option<String> {
		self.get_string(point, attribute + COORDINATE_FIELDS)
	}

	pub fn set_attribute(&mut self, point: usize, attribute: usize, value: f64) -> Result<()> {
		self.set_value(point, attribute + COORDINATE_FIELDS, value)
	}

	pub fn set_attribute_string(&mut self, point: usize, attribute: usize, value: &str) -> Result<()> {
		self.set_string(point, attribute + COORDINATE_FIELDS, value)
	}

	pub fn attribute_count(&self) -> usize {
		self.schema.len().saturating_sub(COORDINATE_FIELDS)
	}
}

impl PointCloud {
	pub fn cursor(&self) -> Option<usize> {
		self.cursor
	}

	pub fn set_cursor(&mut self, point: usize) -> Result<()> {
		if point >= self.records.len() {
			return Err(Error::PointOutOfRange {
				index: point,
				count: self.records.len(),
			});
		}
		self.cursor = Some(point);
		Ok(())
	}

	pub fn clear_cursor(&mut self) {
		self.cursor = None;
	}

	pub fn cursor_value(&self, field: usize) -> Option<f64> {
		self.get_value(self.cursor?, field)
	}

	pub fn cursor_string(&self, field: usize) -> Option<String> {
		self.get_string(self.cursor?, field)
	}

	pub fn cursor_point(&self) -> Option<Point3> {
		self.get_point(self.cursor?)
	}

	pub fn set_cursor_value(&mut self, field: usize, value: f64) -> Result<()> {
		let cursor = self.cursor.ok_or(Error::NoCursor)?;
		self.set_value(cursor, field, value)
	}

	pub fn set_cursor_string(&mut self, field: usize, value: &str) -> Result<()> {
		let cursor = self.cursor.ok_or(Error::NoCursor)?;
		self.set_string(cursor, field, value)
	}

	pub fn set_cursor_point(&mut self, position: Point3) -> Result<()> {
		let cursor = self.cursor.ok_or(Error::NoCursor)?;
		self.set_point(cursor, position)
	}
}

impl PointCloud {
	fn on_points_changed(&mut self) {
		self.schema.invalidate_all();
		self.modified = true;
	}

	fn on_value_changed(&mut self, field: usize) {
		self.schema.invalidate(field);
		self.modified = true;
	}

	fn invalidate_attributes(&mut self) {
		for field in COORDINATE_FIELDS..self.schema.len() {
			self.schema.invalidate(field);
		}
	}

	/// Marks the point cloud as freshly loaded or saved.
	pub fn mark_persisted(&mut self, path: impl Into<PathBuf>) {
		let path = path.into();
		debug!(path = %path.display(), "point cloud persisted");
		self.file_name = Some(path);
		self.modified = false;
	}
}

#[cfg(test)]
pub mod tests {
	use geocloud_type::{Error, FieldType, Point3};

	use super::*;

	pub fn grid(size: usize) -> PointCloud {
		let mut cloud = PointCloud::new();
		for y in 0..size {
			for x in 0..size {
				cloud.add_point(x as f64, y as f64, (x + y) as f64).unwrap();
			}
		}
		cloud
	}

	mod lifecycle {
		use super::*;

		#[test]
		fn test_new_has_coordinates() {
			let cloud = PointCloud::new();
			assert_eq!(cloud.field_count(), 3);
			assert_eq!(cloud.field_name(0), Some("X"));
			assert_eq!(cloud.field_name(2), Some("Z"));
			assert_eq!(cloud.field_type(1), Some(FieldType::Float8));
			assert_eq!(cloud.layout().record_size(), 25);
			assert!(!cloud.is_modified());
		}

		#[test]
		fn test_single_precision_coordinates() {
			let cloud = PointCloud::with_config(PointCloudConfig::new().double_precision_coordinates(false));
			assert_eq!(cloud.field_type(0), Some(FieldType::Float4));
			assert_eq!(cloud.layout().record_size(), 13);
		}

		#[test]
		fn test_destroy_rejects_points() {
			let mut cloud = grid(2);
			cloud.destroy();
			assert_eq!(cloud.field_count(), 0);
			assert_eq!(cloud.point_count(), 0);
			assert!(matches!(cloud.add_point(0.0, 0.0, 0.0), Err(Error::NoFields)));

			cloud.create();
			assert_eq!(cloud.field_count(), 3);
			cloud.add_point(1.0, 2.0, 3.0).unwrap();
		}

		#[test]
		fn test_add_field_after_destroy_creates_coordinates() {
			let mut cloud = PointCloud::new();
			cloud.destroy();
			let index = cloud.add_field("intensity", FieldType::Uint2, Some(0)).unwrap();
			assert_eq!(index, 3);
			assert_eq!(cloud.field_name(0), Some("X"));
			assert_eq!(cloud.field_name(3), Some("intensity"));
		}

		#[test]
		fn test_clone_is_deep() {
			let mut cloud = grid(2);
			cloud.add_field("class", FieldType::Uint1, None).unwrap();
			cloud.set_value(0, 3, 2.0).unwrap();

			let mut copy = cloud.clone();
			copy.set_value(0, 3, 7.0).unwrap();

			assert_eq!(cloud.get_value(0, 3), Some(2.0));
			assert_eq!(copy.get_value(0, 3), Some(7.0));
		}

		#[test]
		fn test_from_structure_copies_fields_only() {
			let mut cloud = grid(3);
			cloud.add_field("class", FieldType::Uint1, None).unwrap();

			let empty = PointCloud::from_structure(&cloud);
			assert_eq!(empty.point_count(), 0);
			assert!(empty.is_compatible(&cloud));
			assert_eq!(empty.field_name(3), Some("class"));
		}

		#[test]
		fn test_from_fields_validates_coordinates() {
			let fields = vec![("X".to_string(), FieldType::Float8), ("Y".to_string(), FieldType::Float8)];
			assert!(matches!(
				PointCloud::from_fields(&fields, PointCloudConfig::default()),
				Err(Error::FieldCountTooSmall(2))
			));

			let fields = vec![
				("X".to_string(), FieldType::Float8),
				("Y".to_string(), FieldType::Text),
				("Z".to_string(), FieldType::Float8),
			];
			assert!(matches!(
				PointCloud::from_fields(&fields, PointCloudConfig::default()),
				Err(Error::UnsupportedType(11))
			));
		}
	}

	mod points {
		use super::*;

		#[test]
		fn test_add_and_get() {
			let mut cloud = PointCloud::new();
			let index = cloud.add_point(1.5, -2.0, 100.25).unwrap();
			assert_eq!(index, 0);
			assert_eq!(cloud.cursor(), Some(0));
			assert_eq!(cloud.get_point(0), Some(Point3::new(1.5, -2.0, 100.25)));
			assert!(cloud.is_modified());
		}

		#[test]
		fn test_invalid_point_access() {
			let mut cloud = grid(2);
			assert_eq!(cloud.get_point(4), None);
			assert_eq!(cloud.get_x(4), 0.0);
			assert!(matches!(cloud.set_value(4, 0, 1.0), Err(Error::PointOutOfRange { index: 4, count: 4 })));
			assert!(matches!(cloud.set_value(0, 3, 1.0), Err(Error::FieldOutOfRange { index: 3, count: 3 })));
		}

		#[test]
		fn test_attributes_are_offset_by_coordinates() {
			let mut cloud = grid(2);
			cloud.add_field("class", FieldType::Uint1, None).unwrap();
			cloud.add_field("label", FieldType::Text, None).unwrap();

			cloud.set_attribute(1, 0, 6.0).unwrap();
			cloud.set_attribute_string(1, 1, "building").unwrap();

			assert_eq!(cloud.attribute_count(), 2);
			assert_eq!(cloud.get_value(1, 3), Some(6.0));
			assert_eq!(cloud.get_attribute_string(1, 1).as_deref(), Some("building"));
			assert_eq!(cloud.get_attribute(0, 0), Some(0.0));
		}

		#[test]
		fn test_del_point_keeps_cursor_on_same_point() {
			let mut cloud = grid(2);
			cloud.set_cursor(3).unwrap();
			cloud.del_point(1).unwrap();
			assert_eq!(cloud.point_count(), 3);
			assert_eq!(cloud.cursor(), Some(2));
			assert_eq!(cloud.cursor_point(), Some(Point3::new(1.0, 1.0, 2.0)));

			cloud.del_point(2).unwrap();
			assert_eq!(cloud.cursor(), None);
			assert!(matches!(cloud.del_point(5), Err(Error::PointOutOfRange { .. })));
		}

		#[test]
		fn test_append_raw_checks_width() {
			let mut cloud = PointCloud::new();
			let err = cloud.append_raw(&[0u8; 23]).unwrap_err();
			assert!(matches!(
				err,
				Error::RecordSizeMismatch {
					expected: 24,
					found: 23
				}
			));

			let mut data = Vec::new();
			data.extend_from_slice(&1.0f64.to_le_bytes());
			data.extend_from_slice(&2.0f64.to_le_bytes());
			data.extend_from_slice(&3.0f64.to_le_bytes());
			cloud.append_raw(&data).unwrap();
			assert_eq!(cloud.get_point(0), Some(Point3::new(1.0, 2.0, 3.0)));
			assert_eq!(cloud.record_data(0), Some(data.as_slice()));
		}
	}

	mod cursor {
		use super::*;

		#[test]
		fn test_cursor_access() {
			let mut cloud = grid(2);
			cloud.clear_cursor();
			assert_eq!(cloud.cursor_value(0), None);
			assert!(matches!(cloud.set_cursor_value(0, 1.0), Err(Error::NoCursor)));

			cloud.set_cursor(2).unwrap();
			cloud.set_cursor_value(2, 42.0).unwrap();
			assert_eq!(cloud.get_z(2), 42.0);
			assert_eq!(cloud.cursor_string(0).as_deref(), Some("0"));

			assert!(cloud.set_cursor(4).is_err());
			assert_eq!(cloud.cursor(), Some(2));
		}
	}

	mod fields {
		use super::*;

		#[test]
		fn test_field_operations_mark_modified() {
			let mut cloud = grid(2);
			cloud.set_modified(false);
			cloud.add_field("a", FieldType::Int4, None).unwrap();
			assert!(cloud.is_modified());

			cloud.set_modified(false);
			cloud.set_field_name(3, "b").unwrap();
			assert!(cloud.is_modified());
			assert_eq!(cloud.field_index("B"), Some(3));

			cloud.set_modified(false);
			assert!(cloud.del_field(0).is_err());
			assert!(!cloud.is_modified());
		}

		#[test]
		fn test_retype_through_container() {
			let mut cloud = grid(3);
			cloud.add_field("v", FieldType::Float4, None).unwrap();
			for point in 0..cloud.point_count() {
				cloud.set_value(point, 3, point as f64 * 0.5).unwrap();
			}

			cloud.set_field_type(3, FieldType::Text).unwrap();
			assert_eq!(cloud.get_string(3, 3).as_deref(), Some("1.5"));
			assert_eq!(cloud.get_value(3, 3), Some(1.5));
		}
	}
}
