// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

pub mod geometry;
pub mod number;
pub mod projection;
pub mod r#type;
