// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::{
	fmt::{Display, Formatter},
	path::{Path, PathBuf},
};

pub const DATA_EXTENSION: &str = "sg-pts";
/// Data file extension accepted on load only.
pub const LEGACY_DATA_EXTENSION: &str = "spc";
pub const HEADER_EXTENSION: &str = "sg-pts-hdr";
pub const INFO_EXTENSION: &str = "sg-info";
pub const PROJECTION_EXTENSION: &str = "sg-prj";
pub const ARCHIVE_EXTENSION: &str = "sg-pts-z";

/// How a point cloud is laid out on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileFormat {
	/// Data file with side files next to it.
	Plain,
	/// Data and side files as entries of one zip archive.
	Compressed,
}

impl FileFormat {
	/// Format implied by the extension of `path`; anything but the archive
	/// extension is read as a plain data file.
	pub fn from_path(path: &Path) -> Self {
		if has_extension(path, ARCHIVE_EXTENSION) {
			FileFormat::Compressed
		} else {
			FileFormat::Plain
		}
	}

	pub fn extension(&self) -> &'static str {
		match self {
			FileFormat::Plain => DATA_EXTENSION,
			FileFormat::Compressed => ARCHIVE_EXTENSION,
		}
	}

	/// `path` with its extension replaced by the one of this format.
	pub fn normalize(&self, path: &Path) -> PathBuf {
		path.with_extension(self.extension())
	}
}

impl Display for FileFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FileFormat::Plain => f.write_str("plain"),
			FileFormat::Compressed => f.write_str("compressed"),
		}
	}
}

pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
	path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Name of a sibling entry sharing the basename `stem`.
pub(crate) fn entry_name(stem: &str, extension: &str) -> String {
	format!("{stem}.{extension}")
}
