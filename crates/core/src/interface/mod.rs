// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

//! Contracts shared with code that works on records without knowing the
//! packed layout.

pub mod record;
