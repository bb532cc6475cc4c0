// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Descriptive information stored next to the point data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
	pub name: String,
	pub description: String,
	/// Free form entries added by applications.
	pub entries: Map<String, Value>,
}

impl Metadata {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn set_entry(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.entries.insert(key.into(), value.into());
	}

	pub fn entry(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}
}
