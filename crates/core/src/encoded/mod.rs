// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

//! Packed record storage.
//!
//! Every point is one contiguous byte buffer: a control byte holding the
//! modified and selected flags, followed by the field values packed back to
//! back in schema order.

pub mod array;
pub mod codec;
pub mod layout;
pub mod record;
