// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::Error;

/// User facing description of an error, suitable for status messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub help: Option<String>,
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_fmt(format_args!("[{}] {}", self.code, self.message))
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Error {
	fn into_diagnostic(self) -> Diagnostic {
		let help = match &self {
			Error::ReservedField(_) => {
				Some("fields 0, 1 and 2 always hold the X, Y and Z coordinates".to_string())
			}
			Error::InvalidSignature | Error::RecordSizeMismatch { .. } => {
				Some("the file is not a point cloud data file or it is damaged".to_string())
			}
			Error::UnsupportedType(_) => Some(
				"point records store integers, floating point numbers, text and dates only".to_string(),
			),
			Error::NoFields => Some("create the coordinate fields before adding points".to_string()),
			_ => None,
		};

		Diagnostic {
			code: self.code().to_string(),
			message: self.to_string(),
			help,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_reserved_field_diagnostic() {
		let diagnostic = Error::ReservedField(2).into_diagnostic();
		assert_eq!(diagnostic.code, "SCHEMA_001");
		assert!(diagnostic.message.contains("field 2"));
		assert!(diagnostic.help.is_some());
		assert!(diagnostic.to_string().starts_with("[SCHEMA_001]"));
	}

	#[test]
	fn test_io_diagnostic_has_no_help() {
		let diagnostic = Error::Io(std::io::Error::other("disk full")).into_diagnostic();
		assert_eq!(diagnostic.code, "IO_005");
		assert_eq!(diagnostic.help, None);
	}
}
