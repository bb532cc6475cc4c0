// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

//! The point data file.
//!
//! ```text
//! [magic: 6 bytes]
//! [record bytes: i32] [field count: i32]
//! field count x [type code: i32] [name length: i32] [name bytes]
//! [record bytes] ... until end of stream
//! ```
//!
//! Integers are little-endian. Records are stored without their control
//! byte. The row count is implied by the stream length.

use std::io::{self, ErrorKind, Read};

use geocloud_type::FieldType;

mod read;
mod write;

pub use read::{ReadSummary, read_point_cloud, read_schema};
pub use write::write_point_cloud;

/// Signature of the current format revision.
pub const MAGIC: &[u8; 6] = b"SGPC01";
/// Bytes compared when accepting a stream.
pub const MAGIC_PREFIX_LEN: usize = 5;
/// Sixth signature byte of files written with the first type enum.
pub const LEGACY_VERSION: u8 = b'0';

/// Three single precision coordinates.
pub const MIN_RECORD_BYTES: i32 = 12;
pub const MIN_FIELD_COUNT: i32 = 3;
/// Exclusive upper bound of a stored field name length.
pub const MAX_NAME_LEN: i32 = 1024;

/// Field list as stored in a data file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSchema {
	/// types were translated from the first revision's enum
	pub legacy: bool,
	/// record size without the control byte
	pub record_bytes: usize,
	pub fields: Vec<(String, FieldType)>,
	/// bytes taken by signature and schema
	pub header_bytes: u64,
}

/// Reads until `buf` is full or the stream ends. Returns the bytes read.
pub(crate) fn read_fill<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
	let mut filled = 0;
	while filled < buf.len() {
		match reader.read(&mut buf[filled..]) {
			Ok(0) => break,
			Ok(n) => filled += n,
			Err(err) if err.kind() == ErrorKind::Interrupted => continue,
			Err(err) => return Err(err),
		}
	}
	Ok(filled)
}
