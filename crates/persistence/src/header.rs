// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

//! Header side-file: a JSON summary written next to every data file.

use geocloud_core::PointCloud;
use geocloud_type::FieldType;
use serde::{Deserialize, Serialize};

pub const HEADER_VERSION: &str = "1.0";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Header {
	pub version: String,
	pub points: usize,
	pub bbox: BoundingBox,
	pub no_data: f64,
	pub attributes: Attributes,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
	pub xmin: f64,
	pub ymin: f64,
	pub zmin: f64,
	pub xmax: f64,
	pub ymax: f64,
	pub zmax: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
	pub count: usize,
	pub fields: Vec<HeaderField>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeaderField {
	pub name: String,
	/// type identifier, e.g. `DOUBLE` or `STRING`
	#[serde(rename = "type")]
	pub field_type: String,
}

impl Header {
	pub fn from_cloud(cloud: &PointCloud) -> Self {
		let bounds = cloud.bounds();
		Self {
			version: HEADER_VERSION.to_string(),
			points: cloud.point_count(),
			bbox: BoundingBox {
				xmin: bounds.xy.x_min,
				ymin: bounds.xy.y_min,
				zmin: bounds.z.min,
				xmax: bounds.xy.x_max,
				ymax: bounds.xy.y_max,
				zmax: bounds.z.max,
			},
			no_data: cloud.no_data_value(),
			attributes: Attributes {
				count: cloud.field_count(),
				fields: cloud
					.fields()
					.iter()
					.map(|field| HeaderField {
						name: field.name.clone(),
						field_type: field.field_type.identifier().to_string(),
					})
					.collect(),
			},
		}
	}

	/// Field types, skipping identifiers this version does not know.
	pub fn field_types(&self) -> impl Iterator<Item = (&str, Option<FieldType>)> {
		self.attributes.fields.iter().map(|field| {
			let field_type = FieldType::ALL.into_iter().find(|ty| ty.identifier() == field.field_type);
			(field.name.as_str(), field_type)
		})
	}
}

#[cfg(test)]
mod tests {
	use geocloud_core::PointCloud;
	use geocloud_type::FieldType;

	use super::*;

	#[test]
	fn test_from_cloud() {
		let mut cloud = PointCloud::new();
		cloud.add_field("label", FieldType::Text, None).unwrap();
		cloud.add_point(1.0, -2.0, 3.0).unwrap();
		cloud.add_point(5.0, 2.0, -1.0).unwrap();

		let header = Header::from_cloud(&cloud);
		assert_eq!(header.version, "1.0");
		assert_eq!(header.points, 2);
		assert_eq!(
			header.bbox,
			BoundingBox {
				xmin: 1.0,
				ymin: -2.0,
				zmin: -1.0,
				xmax: 5.0,
				ymax: 2.0,
				zmax: 3.0,
			}
		);
		assert_eq!(header.no_data, -999999.0);
		assert_eq!(header.attributes.count, 4);
		assert_eq!(header.attributes.fields[0].field_type, "DOUBLE");
		assert_eq!(header.attributes.fields[3].name, "label");
		assert_eq!(header.attributes.fields[3].field_type, "STRING");
	}

	#[test]
	fn test_json_shape() {
		let header = Header::from_cloud(&PointCloud::new());
		let json = serde_json::to_value(&header).unwrap();
		assert_eq!(json["version"], "1.0");
		assert_eq!(json["attributes"]["fields"][2]["name"], "Z");
		assert_eq!(json["attributes"]["fields"][2]["type"], "DOUBLE");
		assert_eq!(json["bbox"]["zmax"], 0.0);

		let parsed: Header = serde_json::from_value(json).unwrap();
		assert_eq!(parsed, header);
	}

	#[test]
	fn test_field_types() {
		let mut header = Header::from_cloud(&PointCloud::new());
		header.attributes.fields[1].field_type = "COLOR".to_string();
		let types: Vec<_> = header.field_types().map(|(_, ty)| ty).collect();
		assert_eq!(types, vec![Some(FieldType::Float8), None, Some(FieldType::Float8)]);
	}
}
