// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
	pub x: f64,
	pub y: f64,
}

impl Point2 {
	pub fn new(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
		}
	}

	pub fn distance(&self, other: &Point2) -> f64 {
		((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Point3 {
	pub fn new(x: f64, y: f64, z: f64) -> Self {
		Self {
			x,
			y,
			z,
		}
	}
}

/// Axis aligned rectangle. Bounds are inclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl Rect {
	/// Builds a rectangle from two corners in any order.
	pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
		Self {
			x_min: x1.min(x2),
			y_min: y1.min(y2),
			x_max: x1.max(x2),
			y_max: y1.max(y2),
		}
	}

	pub fn around(point: Point2, epsilon: f64) -> Self {
		Self::new(point.x - epsilon, point.y - epsilon, point.x + epsilon, point.y + epsilon)
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
	}

	pub fn intersects(&self, other: &Rect) -> bool {
		self.x_min <= other.x_max
			&& other.x_min <= self.x_max
			&& self.y_min <= other.y_max
			&& other.y_min <= self.y_max
	}

	/// Grows the rectangle to include the given location.
	pub fn expand(&mut self, x: f64, y: f64) {
		self.x_min = self.x_min.min(x);
		self.y_min = self.y_min.min(y);
		self.x_max = self.x_max.max(x);
		self.y_max = self.y_max.max(y);
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZRange {
	pub min: f64,
	pub max: f64,
}

impl ZRange {
	pub fn new(min: f64, max: f64) -> Self {
		Self {
			min,
			max,
		}
	}

	pub fn range(&self) -> f64 {
		self.max - self.min
	}
}
