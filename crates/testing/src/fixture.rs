// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use geocloud_core::PointCloud;
use geocloud_type::FieldType;

/// Attribute fields of [`mixed_cloud`], one per storable type.
pub const MIXED_ATTRIBUTES: [(&str, FieldType); 12] = [
	("return", FieldType::Uint1),
	("offset", FieldType::Int1),
	("intensity", FieldType::Uint2),
	("delta", FieldType::Int2),
	("source", FieldType::Uint4),
	("height_mm", FieldType::Int4),
	("gps_time", FieldType::Uint8),
	("signed_time", FieldType::Int8),
	("amplitude", FieldType::Float4),
	("ratio", FieldType::Float8),
	("class", FieldType::Text),
	("acquired", FieldType::Date),
];

/// Point cloud with an attribute of every type and `points` rows of
/// deterministic values.
pub fn mixed_cloud(points: usize) -> PointCloud {
	let mut cloud = PointCloud::new();
	cloud.set_name("mixed");
	for (name, field_type) in MIXED_ATTRIBUTES {
		cloud.add_field(name, field_type, None).expect("add field");
	}

	for i in 0..points {
		let n = i as f64;
		cloud.add_point(n * 0.5, -n * 0.25, (i % 7) as f64 * 1.5).expect("add point");
		let values = [
			(i % 256) as f64,
			(i % 256) as f64 - 128.0,
			((i * 7) % 65_536) as f64,
			((i * 3) % 30_000) as f64 - 15_000.0,
			n * 1000.0,
			-n * 1000.0,
			n * 1_000_000.0,
			-n * 1_000_000.0,
			n * 0.5,
			n / 3.0,
		];
		for (attribute, value) in values.into_iter().enumerate() {
			cloud.set_attribute(i, attribute, value).expect("set attribute");
		}
		cloud.set_attribute_string(i, 10, &format!("pt-{i}")).expect("set text");
		cloud.set_attribute_string(i, 11, &format!("2024-01-{:02}", i % 28 + 1)).expect("set date");
	}

	cloud
}

/// Panics unless both point clouds hold the same fields and values.
pub fn assert_same_points(expected: &PointCloud, actual: &PointCloud) {
	assert_eq!(expected.field_count(), actual.field_count(), "field count");
	for field in 0..expected.field_count() {
		assert_eq!(expected.field_name(field), actual.field_name(field), "name of field {field}");
		assert_eq!(expected.field_type(field), actual.field_type(field), "type of field {field}");
	}

	assert_eq!(expected.point_count(), actual.point_count(), "point count");
	for point in 0..expected.point_count() {
		for field in 0..expected.field_count() {
			assert_eq!(
				expected.get_string(point, field),
				actual.get_string(point, field),
				"point {point}, field {field}"
			);
		}
	}
}
