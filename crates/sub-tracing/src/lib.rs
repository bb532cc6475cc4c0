// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

//! Log output for geocloud binaries.
//!
//! Library crates only emit `tracing` events; binaries pick how they are
//! rendered by installing a subscriber once at startup.

mod builder;

pub use builder::{Format, TracingBuilder};

/// Installs a subscriber configured by `configurator`. Returns false when a
/// subscriber was already installed.
pub fn init_with<F>(configurator: F) -> bool
where
	F: FnOnce(TracingBuilder) -> TracingBuilder,
{
	configurator(TracingBuilder::new()).init()
}
