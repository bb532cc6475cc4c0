// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

//! Zip archive holding the data file and its side files as entries.

use std::{
	fs::File,
	io::{BufReader, BufWriter, Read, Seek, Write},
	path::Path,
};

use geocloud_core::{PointCloud, PointCloudConfig, Progress};
use geocloud_type::{Error, Result};
use tracing::{debug, warn};
use zip::{CompressionMethod, ZipArchive, ZipWriter, result::ZipError, write::SimpleFileOptions};

use crate::{
	binary::{ReadSummary, read_point_cloud, write_point_cloud},
	file_format::{DATA_EXTENSION, HEADER_EXTENSION, INFO_EXTENSION, PROJECTION_EXTENSION, entry_name, has_extension},
	side::SideFiles,
};

pub(crate) fn read(path: &Path, config: PointCloudConfig, progress: &mut dyn Progress) -> Result<(PointCloud, ReadSummary)> {
	let mut archive = open(path)?;
	let DataEntry {
		name,
		stem,
	} = data_entry(&mut archive, &stem_of(path))?;

	let (mut cloud, summary) = {
		let mut entry = archive.by_name(&name).map_err(archive_error)?;
		let length = entry.size();
		read_point_cloud(&mut entry, length, config, progress)?
	};

	let side = SideFiles {
		header: read_entry(&mut archive, &entry_name(&stem, HEADER_EXTENSION))?,
		info: read_entry(&mut archive, &entry_name(&stem, INFO_EXTENSION))?,
		projection: read_entry(&mut archive, &entry_name(&stem, PROJECTION_EXTENSION))?,
	};
	side.apply(&mut cloud);

	Ok((cloud, summary))
}

pub(crate) fn write(path: &Path, cloud: &PointCloud, progress: &mut dyn Progress) -> Result<()> {
	let stem = stem_of(path);
	let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
	let mut zip = ZipWriter::new(BufWriter::new(File::create(path)?));

	zip.start_file(entry_name(&stem, DATA_EXTENSION), options).map_err(archive_error)?;
	write_point_cloud(&mut zip, cloud, progress)?;

	let side = SideFiles::from_cloud(cloud)?;
	for (extension, text) in [
		(HEADER_EXTENSION, &side.header),
		(INFO_EXTENSION, &side.info),
		(PROJECTION_EXTENSION, &side.projection),
	] {
		if let Some(text) = text {
			zip.start_file(entry_name(&stem, extension), options).map_err(archive_error)?;
			zip.write_all(text.as_bytes())?;
		}
	}

	zip.finish().map_err(archive_error)?.flush()?;
	Ok(())
}

pub(crate) fn read_header_text(path: &Path) -> Result<Option<String>> {
	let mut archive = open(path)?;
	let stem = data_entry(&mut archive, &stem_of(path))?.stem;
	read_entry(&mut archive, &entry_name(&stem, HEADER_EXTENSION))
}

fn open(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
	ZipArchive::new(BufReader::new(File::open(path)?)).map_err(archive_error)
}

fn stem_of(path: &Path) -> String {
	path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default()
}

struct DataEntry {
	/// entry name exactly as stored in the archive
	name: String,
	/// basename shared with the side entries
	stem: String,
}

/// Locates the data entry. Prefers the archive's own basename and falls
/// back to the first entry carrying the data extension.
fn data_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, preferred: &str) -> Result<DataEntry> {
	let expected = entry_name(preferred, DATA_EXTENSION);
	if archive.index_for_name(&expected).is_some() {
		return Ok(DataEntry {
			name: expected,
			stem: preferred.to_string(),
		});
	}

	for index in 0..archive.len() {
		let name = archive.by_index(index).map_err(archive_error)?.name().to_string();
		if has_extension(Path::new(&name), DATA_EXTENSION) {
			warn!(expected = %expected, found = %name, "using the first data entry of the archive");
			let stem = name[..name.len() - DATA_EXTENSION.len() - 1].to_string();
			return Ok(DataEntry {
				name,
				stem,
			});
		}
	}

	Err(Error::MissingDataEntry)
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
	match archive.by_name(name) {
		Ok(mut entry) => {
			let mut text = String::new();
			entry.read_to_string(&mut text)?;
			Ok(Some(text))
		}
		Err(ZipError::FileNotFound) => {
			debug!(name, "archive entry missing");
			Ok(None)
		}
		Err(err) => Err(archive_error(err)),
	}
}

fn archive_error(err: ZipError) -> Error {
	match err {
		ZipError::Io(err) => Error::Io(err),
		err => Error::Archive(err.to_string()),
	}
}
