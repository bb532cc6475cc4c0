// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use cloud::{Extent, Metadata, PointCloud, PointRecord, PointRecordMut};
pub use config::PointCloudConfig;
pub use encoded::{
	array::RecordArray,
	codec::NativeValue,
	layout::{CONTROL_BYTES, FLAG_MODIFIED, FLAG_SELECTED, FieldSlot, RecordLayout},
	record::Record,
};
pub use interface::record::{TableRecord, TableRecordMut};
pub use progress::{NoProgress, Progress};
pub use schema::{COORDINATE_FIELDS, FieldDescriptor, Schema};
pub use statistics::{Statistics, StatisticsCache};

pub mod cloud;
pub mod config;
pub mod encoded;
pub mod interface;
pub mod progress;
pub mod schema;
pub mod statistics;

pub use geocloud_type::{Error, Result};
