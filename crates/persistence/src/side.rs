// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use geocloud_core::{Metadata, PointCloud};
use geocloud_type::Result;
use tracing::{debug, warn};

use crate::header::Header;

/// Text content of the side files accompanying a data file.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct SideFiles {
	pub header: Option<String>,
	pub info: Option<String>,
	pub projection: Option<String>,
}

impl SideFiles {
	pub fn from_cloud(cloud: &PointCloud) -> Result<Self> {
		Ok(Self {
			header: Some(serde_json::to_string_pretty(&Header::from_cloud(cloud))?),
			info: Some(serde_json::to_string_pretty(cloud.metadata())?),
			projection: cloud.projection().save().map(str::to_string),
		})
	}

	/// Copies what the side files describe onto a freshly read point cloud.
	/// Missing or unreadable side files leave the defaults in place.
	pub fn apply(self, cloud: &mut PointCloud) {
		if let Some(text) = self.header {
			match serde_json::from_str::<Header>(&text) {
				Ok(header) => cloud.set_no_data(header.no_data),
				Err(err) => warn!(%err, "ignoring unparsable header side file"),
			}
		}

		if let Some(text) = self.info {
			match serde_json::from_str::<Metadata>(&text) {
				Ok(metadata) => *cloud.metadata_mut() = metadata,
				Err(err) => warn!(%err, "ignoring unparsable metadata side file"),
			}
		}

		match self.projection {
			Some(text) => cloud.projection_mut().load(&text),
			None => debug!("no projection side file"),
		}
	}
}
