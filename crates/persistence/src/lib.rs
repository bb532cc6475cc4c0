// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

//! Loading and saving point clouds.
//!
//! A point cloud is stored either as a plain data file with side files next
//! to it, or as a zip archive holding the same files as entries. See
//! [`FileFormat`].

#![cfg_attr(not(debug_assertions), deny(clippy::unwrap_used))]
#![cfg_attr(not(debug_assertions), deny(clippy::expect_used))]

use std::path::{Path, PathBuf};

use geocloud_core::{PointCloud, PointCloudConfig, Progress};
pub use geocloud_type::{Error, Result};
use tracing::{debug, instrument};

mod archive;
pub mod binary;
mod file_format;
pub mod header;
mod plain;
mod side;

pub use binary::{ReadSummary, read_point_cloud, write_point_cloud};
pub use file_format::{
	ARCHIVE_EXTENSION, DATA_EXTENSION, FileFormat, HEADER_EXTENSION, INFO_EXTENSION, LEGACY_DATA_EXTENSION,
	PROJECTION_EXTENSION,
};
pub use header::Header;

/// Loads the point cloud stored at `path`. The format follows the
/// extension.
#[instrument(name = "pointcloud::persistence::load", level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn load(
	path: impl AsRef<Path>,
	config: PointCloudConfig,
	progress: &mut dyn Progress,
) -> Result<(PointCloud, ReadSummary)> {
	let path = path.as_ref();
	let format = FileFormat::from_path(path);

	let (mut cloud, summary) = match format {
		FileFormat::Plain => plain::read(path, config, progress)?,
		FileFormat::Compressed => archive::read(path, config, progress)?,
	};

	cloud.mark_persisted(path);
	debug!(%format, points = summary.points, "point cloud loaded");
	Ok((cloud, summary))
}

/// Replaces the content of `cloud` with the point cloud stored at `path`,
/// reading with the configuration of `cloud`. On error `cloud` is left as
/// it was.
pub fn load_into(cloud: &mut PointCloud, path: impl AsRef<Path>, progress: &mut dyn Progress) -> Result<ReadSummary> {
	let (loaded, summary) = load(path, *cloud.config(), progress)?;
	*cloud = loaded;
	Ok(summary)
}

/// Reads `cloud` again from the file it was last loaded from or saved to.
pub fn reload(cloud: &mut PointCloud, progress: &mut dyn Progress) -> Result<ReadSummary> {
	let path = cloud.file_name().map(Path::to_path_buf).ok_or(Error::NoFileName)?;
	load_into(cloud, path, progress)
}

/// Saves `cloud` and returns the path written.
///
/// Without an explicit `format` the extension of `path` decides. The
/// extension of the returned path always matches the format used.
#[instrument(name = "pointcloud::persistence::save", level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn save(
	cloud: &mut PointCloud,
	path: impl AsRef<Path>,
	format: Option<FileFormat>,
	progress: &mut dyn Progress,
) -> Result<PathBuf> {
	let format = format.unwrap_or_else(|| FileFormat::from_path(path.as_ref()));
	let path = format.normalize(path.as_ref());

	match format {
		FileFormat::Plain => plain::write(&path, cloud, progress)?,
		FileFormat::Compressed => archive::write(&path, cloud, progress)?,
	}

	cloud.mark_persisted(&path);
	debug!(%format, points = cloud.point_count(), "point cloud saved");
	Ok(path)
}

/// Reads only the header side file of the point cloud stored at `path`.
/// `None` when the point cloud has no header.
pub fn read_header(path: impl AsRef<Path>) -> Result<Option<Header>> {
	let path = path.as_ref();
	let text = match FileFormat::from_path(path) {
		FileFormat::Plain => plain::read_header_text(path)?,
		FileFormat::Compressed => archive::read_header_text(path)?,
	};

	Ok(text.map(|text| serde_json::from_str(&text)).transpose()?)
}
