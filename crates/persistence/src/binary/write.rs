// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::io::Write;

use geocloud_core::{PointCloud, Progress};
use geocloud_type::{Error, Result};
use tracing::{instrument, warn};

use super::{MAGIC, MAX_NAME_LEN};

/// Writes signature, schema and all records of `cloud`.
///
/// Returns [`Error::Cancelled`] when `progress` asks to stop; the stream is
/// then incomplete.
#[instrument(name = "pointcloud::persistence::write", level = "debug", skip_all, fields(points = cloud.point_count()))]
pub fn write_point_cloud<W: Write + ?Sized>(writer: &mut W, cloud: &PointCloud, progress: &mut dyn Progress) -> Result<()> {
	if cloud.field_count() == 0 {
		return Err(Error::NoFields);
	}

	let layout = cloud.layout();
	writer.write_all(MAGIC)?;
	writer.write_all(&(layout.data_size() as i32).to_le_bytes())?;
	writer.write_all(&(cloud.field_count() as i32).to_le_bytes())?;

	for field in cloud.fields() {
		let name = stored_name(&field.name);
		writer.write_all(&field.field_type.to_code().to_le_bytes())?;
		writer.write_all(&(name.len() as i32).to_le_bytes())?;
		writer.write_all(name)?;
	}

	let total = cloud.point_count() as u64;
	for (point, record) in cloud.records().iter().enumerate() {
		writer.write_all(record.data())?;

		if !progress.report(point as u64 + 1, total) {
			warn!(point, "writing cancelled");
			return Err(Error::Cancelled);
		}
	}

	writer.flush()?;
	Ok(())
}

/// Name bytes as stored: cut to the longest valid length on a character
/// boundary. Empty names are written as a single blank.
fn stored_name(name: &str) -> &[u8] {
	if name.is_empty() {
		return b" ";
	}

	let max = MAX_NAME_LEN as usize - 1;
	if name.len() <= max {
		return name.as_bytes();
	}

	let mut end = max;
	while !name.is_char_boundary(end) {
		end -= 1;
	}
	&name.as_bytes()[..end]
}
