// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::io::Read;

use geocloud_core::{PointCloud, PointCloudConfig, Progress};
use geocloud_type::{Error, FieldType, Result};
use tracing::{debug, instrument, warn};

use super::{FileSchema, LEGACY_VERSION, MAGIC, MAGIC_PREFIX_LEN, MAX_NAME_LEN, MIN_FIELD_COUNT, MIN_RECORD_BYTES, read_fill};

/// Outcome of reading the rows of a data file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
	pub points: usize,
	/// the stream ended inside a record, which was dropped
	pub truncated: bool,
	/// the progress sink asked to stop, rows read so far were kept
	pub cancelled: bool,
}

/// Reads signature and field list.
pub fn read_schema<R: Read + ?Sized>(reader: &mut R) -> Result<FileSchema> {
	let mut magic = [0u8; 6];
	if read_fill(reader, &mut magic)? < magic.len() || magic[..MAGIC_PREFIX_LEN] != MAGIC[..MAGIC_PREFIX_LEN] {
		return Err(Error::InvalidSignature);
	}
	let legacy = magic[5] == LEGACY_VERSION;
	if legacy {
		debug!("data file uses the legacy type enum");
	}

	let record_bytes = read_i32(reader)?;
	if record_bytes < MIN_RECORD_BYTES {
		return Err(Error::RecordSizeTooSmall(record_bytes));
	}

	let field_count = read_i32(reader)?;
	if field_count < MIN_FIELD_COUNT {
		return Err(Error::FieldCountTooSmall(field_count));
	}

	// grows with the names actually present, the count is untrusted
	let mut header_bytes = (magic.len() + 8) as u64;
	let mut fields = Vec::new();
	for _ in 0..field_count {
		let code = read_i32(reader)?;
		let field_type = if legacy {
			FieldType::from_legacy_code(code)
		} else {
			FieldType::from_code(code)
		}
		.ok_or(Error::UnsupportedType(code))?;

		let name_len = read_i32(reader)?;
		if name_len <= 0 || name_len >= MAX_NAME_LEN {
			return Err(Error::InvalidNameLength(name_len));
		}
		let mut name = vec![0u8; name_len as usize];
		reader.read_exact(&mut name)?;

		header_bytes += 8 + name_len as u64;
		fields.push((String::from_utf8_lossy(&name).into_owned(), field_type));
	}

	Ok(FileSchema {
		legacy,
		record_bytes: record_bytes as usize,
		fields,
		header_bytes,
	})
}

/// Reads a complete data file into a new point cloud.
///
/// `length` is the stream size used for progress, 0 when unknown. A record
/// cut short by the end of the stream is dropped and flagged in the
/// summary. When `progress` cancels, the rows read so far are kept.
#[instrument(name = "pointcloud::persistence::read", level = "debug", skip_all, fields(length = length))]
pub fn read_point_cloud<R: Read + ?Sized>(
	reader: &mut R,
	length: u64,
	config: PointCloudConfig,
	progress: &mut dyn Progress,
) -> Result<(PointCloud, ReadSummary)> {
	let schema = read_schema(reader)?;

	let mut cloud = PointCloud::from_fields(&schema.fields, config)?;
	let expected = cloud.layout().data_size();
	if expected != schema.record_bytes {
		return Err(Error::RecordSizeMismatch {
			expected,
			found: schema.record_bytes,
		});
	}

	if length > schema.header_bytes {
		let rows = (length - schema.header_bytes) / schema.record_bytes as u64;
		cloud.reserve(rows as usize)?;
	}

	let mut summary = ReadSummary::default();
	let mut consumed = schema.header_bytes;
	let mut row = vec![0u8; schema.record_bytes];

	loop {
		let n = read_fill(reader, &mut row)?;
		if n == 0 {
			break;
		}
		if n < row.len() {
			warn!(point = summary.points, bytes = n, "dropping truncated trailing record");
			summary.truncated = true;
			break;
		}

		cloud.append_raw(&row)?;
		summary.points += 1;
		consumed += n as u64;

		if !progress.report(consumed, length) {
			warn!(points = summary.points, "reading cancelled");
			summary.cancelled = true;
			break;
		}
	}

	debug!(points = summary.points, legacy = schema.legacy, "data file read");
	Ok((cloud, summary))
}

fn read_i32<R: Read + ?Sized>(reader: &mut R) -> Result<i32> {
	let mut buf = [0u8; 4];
	reader.read_exact(&mut buf)?;
	Ok(i32::from_le_bytes(buf))
}

#[cfg(test)]
pub mod tests {
	use std::io::Cursor;

	use geocloud_core::{NoProgress, PointCloudConfig};
	use geocloud_type::{Error, FieldType};

	use super::*;

	/// Hand built data file: XYZ as doubles plus one Int2 attribute.
	pub fn data_file(magic: &[u8; 6], codes: [i32; 4], rows: &[[f64; 3]]) -> Vec<u8> {
		let mut bytes = Vec::new();
		bytes.extend_from_slice(magic);
		bytes.extend_from_slice(&26i32.to_le_bytes());
		bytes.extend_from_slice(&4i32.to_le_bytes());
		for (code, name) in codes.iter().zip(["X", "Y", "Z", "class"]) {
			bytes.extend_from_slice(&code.to_le_bytes());
			bytes.extend_from_slice(&(name.len() as i32).to_le_bytes());
			bytes.extend_from_slice(name.as_bytes());
		}
		for (i, row) in rows.iter().enumerate() {
			for value in row {
				bytes.extend_from_slice(&value.to_le_bytes());
			}
			bytes.extend_from_slice(&(i as i16).to_le_bytes());
		}
		bytes
	}

	fn read(bytes: &[u8]) -> Result<(PointCloud, ReadSummary)> {
		read_point_cloud(&mut Cursor::new(bytes), bytes.len() as u64, PointCloudConfig::default(), &mut NoProgress)
	}

	mod schema {
		use super::*;

		#[test]
		fn test_current_codes() {
			let bytes = data_file(b"SGPC01", [10, 10, 10, 4], &[]);
			let schema = read_schema(&mut Cursor::new(&bytes)).unwrap();
			assert!(!schema.legacy);
			assert_eq!(schema.record_bytes, 26);
			assert_eq!(schema.fields[3], ("class".to_string(), FieldType::Int2));
			assert_eq!(schema.header_bytes, bytes.len() as u64);
		}

		#[test]
		fn test_legacy_codes_translate() {
			let bytes = data_file(b"SGPC00", [6, 6, 6, 2], &[[1.0, 2.0, 3.0]]);
			let (cloud, summary) = read(&bytes).unwrap();
			assert_eq!(summary.points, 1);
			assert_eq!(cloud.field_type(0), Some(FieldType::Float8));
			assert_eq!(cloud.field_type(3), Some(FieldType::Int2));
			assert_eq!(cloud.field_type(3).unwrap().to_code(), 4);
		}

		#[test]
		fn test_only_five_signature_bytes_compared() {
			let bytes = data_file(b"SGPC0X", [10, 10, 10, 4], &[]);
			assert!(read(&bytes).is_ok());
		}

		#[test]
		fn test_huge_field_count() {
			let mut bytes = b"SGPC01".to_vec();
			bytes.extend_from_slice(&24i32.to_le_bytes());
			bytes.extend_from_slice(&i32::MAX.to_le_bytes());
			assert!(read(&bytes).is_err());

			// a few valid fields, then the stream ends
			let mut bytes = data_file(b"SGPC01", [10, 10, 10, 4], &[]);
			bytes[10..14].copy_from_slice(&i32::MAX.to_le_bytes());
			assert!(matches!(read_schema(&mut Cursor::new(&bytes)), Err(Error::Io(_))));
		}

		#[test]
		fn test_bad_signature() {
			let bytes = data_file(b"XGPC01", [10, 10, 10, 4], &[]);
			assert!(matches!(read(&bytes), Err(Error::InvalidSignature)));
			assert!(matches!(read(b"SGP"), Err(Error::InvalidSignature)));
		}

		#[test]
		fn test_unknown_legacy_code() {
			let bytes = data_file(b"SGPC00", [6, 6, 6, 9], &[]);
			assert!(matches!(read(&bytes), Err(Error::UnsupportedType(9))));
		}

		#[test]
		fn test_unstorable_code() {
			let bytes = data_file(b"SGPC01", [10, 10, 10, 13], &[]);
			assert!(matches!(read(&bytes), Err(Error::UnsupportedType(13))));
		}

		#[test]
		fn test_small_record_size() {
			let mut bytes = data_file(b"SGPC01", [10, 10, 10, 4], &[]);
			bytes[6..10].copy_from_slice(&11i32.to_le_bytes());
			assert!(matches!(read(&bytes), Err(Error::RecordSizeTooSmall(11))));
		}

		#[test]
		fn test_record_size_must_match_fields() {
			let mut bytes = data_file(b"SGPC01", [10, 10, 10, 4], &[]);
			bytes[6..10].copy_from_slice(&30i32.to_le_bytes());
			assert!(matches!(
				read(&bytes),
				Err(Error::RecordSizeMismatch {
					expected: 26,
					found: 30
				})
			));
		}

		#[test]
		fn test_too_few_fields() {
			let mut bytes = data_file(b"SGPC01", [10, 10, 10, 4], &[]);
			bytes[10..14].copy_from_slice(&2i32.to_le_bytes());
			assert!(matches!(read(&bytes), Err(Error::FieldCountTooSmall(2))));
		}

		#[test]
		fn test_name_length_bounds() {
			for bad in [0i32, -1, 1024] {
				let mut bytes = data_file(b"SGPC01", [10, 10, 10, 4], &[]);
				// name length of the first field
				bytes[18..22].copy_from_slice(&bad.to_le_bytes());
				assert!(matches!(read(&bytes), Err(Error::InvalidNameLength(n)) if n == bad));
			}
		}
	}

	mod rows {
		use super::*;

		#[test]
		fn test_reads_until_end() {
			let bytes = data_file(b"SGPC01", [10, 10, 10, 4], &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
			let (cloud, summary) = read(&bytes).unwrap();
			assert_eq!(
				summary,
				ReadSummary {
					points: 2,
					truncated: false,
					cancelled: false
				}
			);
			assert_eq!(cloud.get_z(1), 6.0);
			assert_eq!(cloud.get_value(1, 3), Some(1.0));
			assert!(!cloud.is_selected(0));
		}

		#[test]
		fn test_truncated_row_dropped() {
			let mut bytes = data_file(b"SGPC01", [10, 10, 10, 4], &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
			bytes.truncate(bytes.len() - 5);
			let (cloud, summary) = read(&bytes).unwrap();
			assert_eq!(cloud.point_count(), 1);
			assert!(summary.truncated);
		}

		#[test]
		fn test_cancel_keeps_rows_read() {
			let rows: Vec<[f64; 3]> = (0..10).map(|i| [i as f64, 0.0, 0.0]).collect();
			let bytes = data_file(b"SGPC01", [10, 10, 10, 4], &rows);

			let mut calls = 0;
			let mut cancel_after_three = |_: u64, _: u64| {
				calls += 1;
				calls < 3
			};
			let (cloud, summary) = read_point_cloud(
				&mut Cursor::new(&bytes),
				bytes.len() as u64,
				PointCloudConfig::default(),
				&mut cancel_after_three,
			)
			.unwrap();

			assert!(summary.cancelled);
			assert_eq!(summary.points, 3);
			assert_eq!(cloud.point_count(), 3);
			assert_eq!(cloud.get_x(2), 2.0);
		}

		#[test]
		fn test_progress_reaches_length() {
			let bytes = data_file(b"SGPC01", [10, 10, 10, 4], &[[0.0; 3]; 4]);
			let mut last = (0, 0);
			let mut record = |current: u64, total: u64| {
				last = (current, total);
				true
			};
			read_point_cloud(&mut Cursor::new(&bytes), bytes.len() as u64, PointCloudConfig::default(), &mut record)
				.unwrap();
			assert_eq!(last, (bytes.len() as u64, bytes.len() as u64));
		}

		#[test]
		fn test_config_is_applied() {
			let bytes = data_file(b"SGPC01", [10, 10, 10, 4], &[]);
			let (cloud, _) = read_point_cloud(
				&mut Cursor::new(&bytes),
				0,
				PointCloudConfig::new().no_data_value(-1.0),
				&mut NoProgress,
			)
			.unwrap();
			assert_eq!(cloud.no_data_value(), -1.0);
		}
	}
}
