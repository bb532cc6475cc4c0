// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::path::Path;

use geocloud_core::{PointCloud, PointCloudConfig, Progress};
use geocloud_persistence::{FileFormat, Header, load, read_header, save};
use geocloud_type::{Error, format_float};
use tracing::{info, warn};

/// Logs every tenth of the transfer.
struct ProgressLog {
	last: u64,
}

impl Progress for ProgressLog {
	fn report(&mut self, current: u64, total: u64) -> bool {
		if total > 0 {
			let tenth = current * 10 / total;
			if tenth > self.last {
				self.last = tenth;
				info!(percent = tenth * 10, "transfer");
			}
		}
		true
	}
}

fn open(path: &Path, config: PointCloudConfig) -> Result<PointCloud, Error> {
	let (cloud, summary) = load(path, config, &mut ProgressLog {
		last: 0,
	})?;
	if summary.truncated {
		warn!(points = summary.points, "file ends inside a record");
	}
	Ok(cloud)
}

pub fn info(path: &Path, config: PointCloudConfig) -> Result<(), Error> {
	let cloud = open(path, config)?;
	let bounds = cloud.bounds();

	println!("name:       {}", cloud.name());
	println!("points:     {}", cloud.point_count());
	println!("no data:    {}", format_float(cloud.no_data_value()));
	println!(
		"extent:     {} {} - {} {}",
		format_float(bounds.xy.x_min),
		format_float(bounds.xy.y_min),
		format_float(bounds.xy.x_max),
		format_float(bounds.xy.y_max)
	);
	println!("z range:    {} - {}", format_float(bounds.z.min), format_float(bounds.z.max));
	if cloud.projection().is_okay() {
		println!("projection: {}", cloud.projection().wkt());
	}

	println!();
	println!("{:<4} {:<24} {:<8} {:>14} {:>14} {:>14}", "#", "name", "type", "min", "max", "mean");
	for (index, field) in cloud.fields().iter().enumerate() {
		if field.field_type.is_textual() {
			println!("{:<4} {:<24} {:<8}", index, field.name, field.field_type);
			continue;
		}

		let stats = cloud.statistics(index).unwrap_or_default();
		println!(
			"{:<4} {:<24} {:<8} {:>14} {:>14} {:>14}",
			index,
			field.name,
			field.field_type,
			format_float(stats.min()),
			format_float(stats.max()),
			format_float(stats.mean())
		);
	}
	Ok(())
}

pub fn header(path: &Path) -> Result<(), Error> {
	let Some(header) = read_header(path)? else {
		warn!(path = %path.display(), "no header side file");
		return Ok(());
	};

	println!("{}", serde_json::to_string_pretty(&header)?);
	for name in unknown_fields(&header) {
		warn!(field = name, "field type not supported by this version");
	}
	Ok(())
}

/// Names of header fields whose type identifier is not recognised.
fn unknown_fields(header: &Header) -> Vec<&str> {
	header.field_types().filter(|(_, field_type)| field_type.is_none()).map(|(name, _)| name).collect()
}

pub fn convert(input: &Path, output: &Path, format: Option<FileFormat>, config: PointCloudConfig) -> Result<(), Error> {
	let mut cloud = open(input, config)?;
	let written = save(&mut cloud, output, format, &mut ProgressLog {
		last: 0,
	})?;
	info!(points = cloud.point_count(), path = %written.display(), "converted");
	println!("{}", written.display());
	Ok(())
}

#[cfg(test)]
mod tests {
	use geocloud_core::PointCloud;
	use geocloud_type::FieldType;

	use super::*;

	#[test]
	fn test_unknown_fields() {
		let mut cloud = PointCloud::new();
		cloud.add_field("class", FieldType::Uint1, None).unwrap();
		cloud.add_field("label", FieldType::Text, None).unwrap();

		let mut header = Header::from_cloud(&cloud);
		assert!(unknown_fields(&header).is_empty());

		header.attributes.fields[4].field_type = "complex".to_string();
		assert_eq!(unknown_fields(&header), ["label"]);
	}
}
