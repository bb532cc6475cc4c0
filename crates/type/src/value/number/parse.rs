// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

/// Strict decimal parse. Surrounding whitespace is ignored, anything else
/// that is not part of the number makes the parse fail.
pub fn parse_float(text: &str) -> Option<f64> {
	let trimmed = text.trim();
	if trimmed.is_empty() {
		return None;
	}
	trimmed.parse::<f64>().ok()
}

/// Lenient decimal parse of the longest numeric prefix, after leading
/// whitespace. Returns `None` when no digit is found.
pub fn parse_leading_float(text: &str) -> Option<f64> {
	let bytes = text.trim_start().as_bytes();
	let mut end = 0;

	if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
		end += 1;
	}

	let int_start = end;
	while end < bytes.len() && bytes[end].is_ascii_digit() {
		end += 1;
	}
	let mut digits = end - int_start;

	if end < bytes.len() && bytes[end] == b'.' {
		let frac_start = end + 1;
		let mut frac_end = frac_start;
		while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
			frac_end += 1;
		}
		digits += frac_end - frac_start;
		end = frac_end;
	}

	if digits == 0 {
		return None;
	}

	if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
		let mut exp_end = end + 1;
		if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
			exp_end += 1;
		}
		let exp_digits = exp_end;
		while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
			exp_end += 1;
		}
		if exp_end > exp_digits {
			end = exp_end;
		}
	}

	// the prefix is pure ASCII so it is valid UTF-8
	std::str::from_utf8(&bytes[..end]).ok()?.parse::<f64>().ok()
}
