// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

pub mod fixture;
pub mod reader;
pub mod tempdir;

pub use fixture::{MIXED_ATTRIBUTES, assert_same_points, mixed_cloud};
pub use reader::{ChunkedReader, CountingReader};
pub use tempdir::temp_dir;
