// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

mod parse;

use super::r#type::TEXT_FIELD_SIZE;

pub use parse::{parse_float, parse_leading_float};

/// Decimal text for a floating point value. Uses the shortest
/// representation that parses back to the same value, independent of
/// locale. Plain notation unless it would not fit a text field, then
/// scientific notation.
pub fn format_float(value: f64) -> String {
	if value.is_nan() {
		return "nan".to_string();
	}
	if value.is_infinite() {
		return if value > 0.0 {
			"inf".to_string()
		} else {
			"-inf".to_string()
		};
	}
	let plain = format!("{}", value);
	if plain.len() <= TEXT_FIELD_SIZE {
		plain
	} else {
		format!("{:e}", value)
	}
}
