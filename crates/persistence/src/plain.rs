// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

//! Data file with header, info and projection files next to it.

use std::{
	fs::{self, File},
	io::{BufReader, BufWriter, ErrorKind},
	path::Path,
};

use geocloud_core::{PointCloud, PointCloudConfig, Progress};
use geocloud_type::Result;
use tracing::debug;

use crate::{
	binary::{ReadSummary, read_point_cloud, write_point_cloud},
	file_format::{HEADER_EXTENSION, INFO_EXTENSION, PROJECTION_EXTENSION},
	side::SideFiles,
};

pub(crate) fn read(path: &Path, config: PointCloudConfig, progress: &mut dyn Progress) -> Result<(PointCloud, ReadSummary)> {
	let file = File::open(path)?;
	let length = file.metadata()?.len();
	let (mut cloud, summary) = read_point_cloud(&mut BufReader::new(file), length, config, progress)?;

	read_side_files(path)?.apply(&mut cloud);
	Ok((cloud, summary))
}

pub(crate) fn write(path: &Path, cloud: &PointCloud, progress: &mut dyn Progress) -> Result<()> {
	let mut writer = BufWriter::new(File::create(path)?);
	write_point_cloud(&mut writer, cloud, progress)?;

	let side = SideFiles::from_cloud(cloud)?;
	if let Some(header) = &side.header {
		fs::write(path.with_extension(HEADER_EXTENSION), header)?;
	}
	if let Some(info) = &side.info {
		fs::write(path.with_extension(INFO_EXTENSION), info)?;
	}

	let projection = path.with_extension(PROJECTION_EXTENSION);
	match &side.projection {
		Some(wkt) => fs::write(projection, wkt)?,
		// a stale projection would be picked up on the next load
		None => remove_if_exists(&projection)?,
	}

	Ok(())
}

pub(crate) fn read_header_text(path: &Path) -> Result<Option<String>> {
	read_optional(&path.with_extension(HEADER_EXTENSION))
}

fn read_side_files(path: &Path) -> Result<SideFiles> {
	Ok(SideFiles {
		header: read_optional(&path.with_extension(HEADER_EXTENSION))?,
		info: read_optional(&path.with_extension(INFO_EXTENSION))?,
		projection: read_optional(&path.with_extension(PROJECTION_EXTENSION))?,
	})
}

fn read_optional(path: &Path) -> Result<Option<String>> {
	match fs::read_to_string(path) {
		Ok(text) => Ok(Some(text)),
		Err(err) if err.kind() == ErrorKind::NotFound => {
			debug!(path = %path.display(), "side file missing");
			Ok(None)
		}
		Err(err) => Err(err.into()),
	}
}

fn remove_if_exists(path: &Path) -> Result<()> {
	match fs::remove_file(path) {
		Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
		_ => Ok(()),
	}
}
