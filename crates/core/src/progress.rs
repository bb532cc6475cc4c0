// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

/// Receives progress of long running scans. Returning `false` asks the
/// caller to stop after the current unit of work.
pub trait Progress {
	fn report(&mut self, current: u64, total: u64) -> bool;
}

impl<F> Progress for F
where
	F: FnMut(u64, u64) -> bool,
{
	fn report(&mut self, current: u64, total: u64) -> bool {
		self(current, total)
	}
}

/// Progress sink that never cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
	fn report(&mut self, _current: u64, _total: u64) -> bool {
		true
	}
}
