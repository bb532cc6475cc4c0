// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

//! Builder pattern for configuring the tracing subscriber

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Output layout of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
	#[default]
	Text,
	Json,
}

/// Builder for the process wide tracing subscriber
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	level: Level,
	filter: Option<String>,
	format: Format,
	with_target: bool,
	use_env: bool,
}

impl TracingBuilder {
	/// Create a new builder: `info` level, text output, `RUST_LOG` honoured
	pub fn new() -> Self {
		Self {
			level: Level::INFO,
			filter: None,
			format: Format::Text,
			with_target: false,
			use_env: true,
		}
	}

	/// Level used when no filter directive matches
	pub fn level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	/// Filter directives such as `geocloud_persistence=debug`
	pub fn filter(mut self, directives: impl Into<String>) -> Self {
		self.filter = Some(directives.into());
		self
	}

	pub fn format(mut self, format: Format) -> Self {
		self.format = format;
		self
	}

	pub fn json(self) -> Self {
		self.format(Format::Json)
	}

	pub fn with_target(mut self, with_target: bool) -> Self {
		self.with_target = with_target;
		self
	}

	/// Whether `RUST_LOG` overrides the configured filter
	pub fn use_env(mut self, use_env: bool) -> Self {
		self.use_env = use_env;
		self
	}

	pub(crate) fn env_filter(&self) -> EnvFilter {
		if self.use_env {
			if let Ok(filter) = EnvFilter::try_from_default_env() {
				return filter;
			}
		}

		let directives = match &self.filter {
			Some(filter) => format!("{},{}", self.level, filter),
			None => self.level.to_string(),
		};
		EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
	}

	/// Installs the subscriber. Returns false when one was already
	/// installed, which leaves the existing one in place.
	pub fn init(self) -> bool {
		let filter = self.env_filter();
		let builder = fmt().with_env_filter(filter).with_target(self.with_target).with_writer(std::io::stderr);

		let result = match self.format {
			Format::Text => builder.try_init(),
			Format::Json => builder.json().try_init(),
		};
		result.is_ok()
	}
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use tracing::Level;
	use tracing_subscriber::filter::LevelFilter;

	use super::*;

	#[test]
	fn test_filter_without_env() {
		let builder = TracingBuilder::new().use_env(false).level(Level::WARN);
		assert_eq!(builder.env_filter().max_level_hint(), Some(LevelFilter::WARN));

		let builder = builder.filter("geocloud_persistence=debug");
		assert_eq!(builder.env_filter().max_level_hint(), Some(LevelFilter::DEBUG));
	}

	#[test]
	fn test_invalid_directive_falls_back_to_level() {
		let builder = TracingBuilder::new().use_env(false).filter("geocloud=loud");
		assert_eq!(builder.env_filter().max_level_hint(), Some(LevelFilter::INFO));
	}

	#[test]
	fn test_second_init_is_refused() {
		let first = TracingBuilder::new().use_env(false).init();
		let second = TracingBuilder::new().use_env(false).json().init();
		// the only test in this binary that installs a subscriber
		assert!(first);
		assert!(!second);
	}
}
