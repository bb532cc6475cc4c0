// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use serde::{Deserialize, Serialize};

/// Spatial reference carried alongside a point cloud.
///
/// The container never interprets the definition; it only persists it next
/// to the data file as well-known text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
	wkt: String,
}

impl Projection {
	pub fn from_wkt(wkt: impl Into<String>) -> Self {
		Self {
			wkt: wkt.into(),
		}
	}

	pub fn is_okay(&self) -> bool {
		!self.wkt.trim().is_empty()
	}

	pub fn wkt(&self) -> &str {
		&self.wkt
	}

	/// Replaces the definition with the content of a projection side-file.
	pub fn load(&mut self, text: &str) {
		self.wkt = text.trim().to_string();
	}

	/// Text written to a projection side-file, `None` when undefined.
	pub fn save(&self) -> Option<&str> {
		self.is_okay().then_some(self.wkt.as_str())
	}

	pub fn clear(&mut self) {
		self.wkt.clear();
	}
}
