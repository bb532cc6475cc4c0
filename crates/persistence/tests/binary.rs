// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::io::Cursor;

use geocloud_core::{NoProgress, PointCloud, PointCloudConfig};
use geocloud_persistence::{Error, ReadSummary, read_point_cloud, write_point_cloud};
use geocloud_testing::{ChunkedReader, CountingReader, MIXED_ATTRIBUTES, assert_same_points, mixed_cloud};
use geocloud_type::FieldType;

fn encode(cloud: &PointCloud) -> Vec<u8> {
	let mut bytes = Vec::new();
	write_point_cloud(&mut bytes, cloud, &mut NoProgress).unwrap();
	bytes
}

fn decode(bytes: &[u8]) -> (PointCloud, ReadSummary) {
	read_point_cloud(&mut Cursor::new(bytes), bytes.len() as u64, PointCloudConfig::default(), &mut NoProgress).unwrap()
}

#[test]
fn test_round_trip_mixed_types() {
	for points in [0, 1, 1000] {
		let cloud = mixed_cloud(points);
		let (read, summary) = decode(&encode(&cloud));

		assert_eq!(summary.points, points);
		assert!(!summary.truncated);
		assert!(!summary.cancelled);
		assert_same_points(&cloud, &read);
	}
}

#[test]
fn test_round_trip_keeps_every_type() {
	let (read, _) = decode(&encode(&mixed_cloud(3)));
	for (attribute, (name, field_type)) in MIXED_ATTRIBUTES.iter().enumerate() {
		assert_eq!(read.field_name(attribute + 3), Some(*name));
		assert_eq!(read.field_type(attribute + 3), Some(*field_type));
	}
	assert_eq!(read.get_attribute_string(2, 10).as_deref(), Some("pt-2"));
	assert_eq!(read.get_attribute_string(2, 11).as_deref(), Some("2024-01-03"));
}

#[test]
fn test_single_precision_coordinates() {
	let mut cloud = PointCloud::with_config(PointCloudConfig::new().double_precision_coordinates(false));
	cloud.add_point(1.5, 2.5, 3.5).unwrap();
	let bytes = encode(&cloud);

	let (read, _) = decode(&bytes);
	assert_eq!(read.field_type(0), Some(FieldType::Float4));
	assert_eq!(read.layout().data_size(), 12);
	assert_eq!(read.get_y(0), 2.5);
}

#[test]
fn test_short_reads() {
	let cloud = mixed_cloud(50);
	let bytes = encode(&cloud);
	let mut reader = ChunkedReader::new(Cursor::new(&bytes), 7);

	let (read, summary) =
		read_point_cloud(&mut reader, bytes.len() as u64, PointCloudConfig::default(), &mut NoProgress).unwrap();
	assert_eq!(summary.points, 50);
	assert_same_points(&cloud, &read);
}

#[test]
fn test_reads_whole_stream() {
	let bytes = encode(&mixed_cloud(20));
	let mut reader = CountingReader::new(Cursor::new(&bytes));
	read_point_cloud(&mut reader, 0, PointCloudConfig::default(), &mut NoProgress).unwrap();
	assert_eq!(reader.bytes(), bytes.len() as u64);
}

#[test]
fn test_truncated_trailing_record() {
	let cloud = mixed_cloud(10);
	let mut bytes = encode(&cloud);
	bytes.truncate(bytes.len() - 3);

	let (read, summary) = decode(&bytes);
	assert!(summary.truncated);
	assert_eq!(summary.points, 9);
	for point in 0..9 {
		assert_eq!(read.get_string(point, 13), cloud.get_string(point, 13));
	}
}

#[test]
fn test_cancelled_write() {
	let cloud = mixed_cloud(10);
	let mut bytes = Vec::new();
	let mut stop_at_five = |current: u64, _: u64| current < 5;
	let err = write_point_cloud(&mut bytes, &cloud, &mut stop_at_five).unwrap_err();
	assert!(matches!(err, Error::Cancelled));
}

#[test]
fn test_legacy_file_matches_current_codes() {
	fn file(magic: &[u8; 6], code: i32) -> Vec<u8> {
		let mut bytes = Vec::new();
		bytes.extend_from_slice(magic);
		bytes.extend_from_slice(&16i32.to_le_bytes());
		bytes.extend_from_slice(&4i32.to_le_bytes());
		for (code, name) in [(code, "X"), (code, "Y"), (code, "Z"), (code, "t")] {
			bytes.extend_from_slice(&code.to_le_bytes());
			bytes.extend_from_slice(&1i32.to_le_bytes());
			bytes.extend_from_slice(name.as_bytes());
		}
		for value in [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0] {
			bytes.extend_from_slice(&value.to_le_bytes());
		}
		bytes
	}

	// Float4 is 5 in the legacy enum and 9 today
	let (legacy, _) = decode(&file(b"SGPC00", 5));
	let (current, _) = decode(&file(b"SGPC01", 9));

	for field in 0..4 {
		assert_eq!(legacy.field_type(field), Some(FieldType::Float4));
		assert_eq!(legacy.field_type(field).map(|ty| ty.to_code()), current.field_type(field).map(|ty| ty.to_code()));
	}
	assert_same_points(&current, &legacy);
	// seven values: one full record and a partial one that is dropped
	assert_eq!(legacy.point_count(), 1);
}
