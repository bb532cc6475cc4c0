// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use geocloud_type::{Point2, Rect, ZRange};
use serde::{Deserialize, Serialize};

use super::PointCloud;
use crate::{
	encoded::codec::decode_f64,
	schema::COORDINATE_FIELDS,
	statistics::{Statistics, scan},
};

/// Bounding box of all points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
	pub xy: Rect,
	pub z: ZRange,
}

impl PointCloud {
	/// Statistics of one field, evaluated on first use after a change.
	///
	/// Coordinates always visit every point. Attributes skip no-data values
	/// and may be sampled, see [`crate::PointCloudConfig::max_samples`].
	pub fn statistics(&self, field: usize) -> Option<Statistics> {
		let descriptor = self.schema.field(field)?;
		let slot = *self.schema.layout().slot(field)?;
		let coordinate = field < COORDINATE_FIELDS;
		let records = self.records.as_slice();

		Some(descriptor.statistics.get_or_evaluate(|| {
			scan(records.len(), self.config.max_samples, coordinate, |row| {
				let value = decode_f64(&slot, &records[row]);
				(coordinate || !self.is_no_data(value)).then_some(value)
			})
		}))
	}

	pub fn minimum(&self, field: usize) -> Option<f64> {
		self.statistics(field).map(|s| s.min())
	}

	pub fn maximum(&self, field: usize) -> Option<f64> {
		self.statistics(field).map(|s| s.max())
	}

	pub fn mean(&self, field: usize) -> Option<f64> {
		self.statistics(field).map(|s| s.mean())
	}

	pub fn variance(&self, field: usize) -> Option<f64> {
		self.statistics(field).map(|s| s.variance())
	}

	pub fn range(&self, field: usize) -> Option<f64> {
		self.statistics(field).map(|s| s.range())
	}

	pub fn stddev(&self, field: usize) -> Option<f64> {
		self.statistics(field).map(|s| s.stddev())
	}

	/// Number of full or sampled field scans done so far for the current
	/// fields.
	pub fn statistics_scans(&self) -> usize {
		self.schema.fields().iter().map(|field| field.statistics.scans()).sum()
	}

	/// X/Y bounding box; all zero for an empty point cloud.
	pub fn extent(&self) -> Rect {
		self.bounds().xy
	}

	pub fn z_range(&self) -> ZRange {
		self.bounds().z
	}

	pub fn bounds(&self) -> Extent {
		let (Some(x), Some(y), Some(z)) = (self.statistics(0), self.statistics(1), self.statistics(2)) else {
			return Extent::default();
		};
		if x.is_empty() {
			return Extent::default();
		}

		Extent {
			xy: Rect {
				x_min: x.min(),
				y_min: y.min(),
				x_max: x.max(),
				y_max: y.max(),
			},
			z: ZRange::new(z.min(), z.max()),
		}
	}

	/// Closest point to `location` within `epsilon` along both axes.
	pub fn nearest_point(&self, location: Point2, epsilon: f64) -> Option<usize> {
		if self.is_empty() {
			return None;
		}

		let window = Rect::around(location, epsilon);
		if !window.intersects(&self.extent()) {
			return None;
		}

		let mut nearest: Option<(usize, f64)> = None;
		for point in 0..self.point_count() {
			let (x, y) = (self.get_x(point), self.get_y(point));
			if !window.contains(x, y) {
				continue;
			}
			let distance = location.distance(&Point2::new(x, y));
			if nearest.is_none_or(|(_, best)| distance < best) {
				nearest = Some((point, distance));
			}
		}

		nearest.map(|(point, _)| point)
	}
}
