// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use serde::{Deserialize, Serialize};

/// Value marking a missing attribute unless configured otherwise.
pub const DEFAULT_NO_DATA_VALUE: f64 = -999999.0;

/// Per container settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointCloudConfig {
	/// Attribute value treated as missing by statistics.
	pub no_data_value: f64,
	/// Upper bound of rows visited when evaluating attribute statistics,
	/// 0 visits every row.
	pub max_samples: usize,
	/// Store X, Y and Z as 8 byte floats instead of 4 byte floats.
	pub double_precision_coordinates: bool,
}

impl Default for PointCloudConfig {
	fn default() -> Self {
		Self::new()
	}
}

impl PointCloudConfig {
	pub fn new() -> Self {
		Self {
			no_data_value: DEFAULT_NO_DATA_VALUE,
			max_samples: 0,
			double_precision_coordinates: true,
		}
	}

	pub fn no_data_value(mut self, value: f64) -> Self {
		self.no_data_value = value;
		self
	}

	pub fn max_samples(mut self, samples: usize) -> Self {
		self.max_samples = samples;
		self
	}

	pub fn double_precision_coordinates(mut self, double: bool) -> Self {
		self.double_precision_coordinates = double;
		self
	}
}
