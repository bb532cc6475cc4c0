// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::sync::{
	OnceLock,
	atomic::{AtomicUsize, Ordering},
};

use serde::{Deserialize, Serialize};

/// Running statistics over the values of one field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
	count: u64,
	min: f64,
	max: f64,
	sum: f64,
	sum_of_squares: f64,
}

impl Statistics {
	pub fn new() -> Self {
		Self::default()
	}

	/// Statistics over every value of `values`.
	pub fn evaluate(values: impl IntoIterator<Item = f64>) -> Self {
		let mut statistics = Self::new();
		for value in values {
			statistics.add(value);
		}
		statistics
	}

	pub fn add(&mut self, value: f64) {
		if self.count == 0 {
			self.min = value;
			self.max = value;
		} else {
			self.min = self.min.min(value);
			self.max = self.max.max(value);
		}
		self.count += 1;
		self.sum += value;
		self.sum_of_squares += value * value;
	}

	/// Replaces the count with an estimated population size. The sums are
	/// scaled by the same factor so mean and variance are unchanged.
	pub fn set_count(&mut self, count: u64) {
		if self.count > 0 && count != self.count {
			let scale = count as f64 / self.count as f64;
			self.sum *= scale;
			self.sum_of_squares *= scale;
		}
		self.count = count;
	}

	pub fn count(&self) -> u64 {
		self.count
	}

	pub fn is_empty(&self) -> bool {
		self.count == 0
	}

	pub fn min(&self) -> f64 {
		self.min
	}

	pub fn max(&self) -> f64 {
		self.max
	}

	pub fn range(&self) -> f64 {
		self.max - self.min
	}

	pub fn sum(&self) -> f64 {
		self.sum
	}

	pub fn sum_of_squares(&self) -> f64 {
		self.sum_of_squares
	}

	pub fn mean(&self) -> f64 {
		if self.count == 0 {
			return 0.0;
		}
		self.sum / self.count as f64
	}

	/// Population variance.
	pub fn variance(&self) -> f64 {
		if self.count == 0 {
			return 0.0;
		}
		let mean = self.mean();
		(self.sum_of_squares / self.count as f64 - mean * mean).max(0.0)
	}

	pub fn stddev(&self) -> f64 {
		self.variance().sqrt()
	}
}

/// Statistics over `total` rows.
///
/// `value` returns `None` for rows that must not be counted. Without a
/// sampling cap (`max_samples == 0`), with `exhaustive` set or when the cap
/// covers every row all rows are visited. Otherwise rows are visited at a
/// fixed stride of `total / max_samples` and the count is scaled back up to
/// an estimate for the whole population.
pub fn scan(total: usize, max_samples: usize, exhaustive: bool, mut value: impl FnMut(usize) -> Option<f64>) -> Statistics {
	let mut statistics = Statistics::new();

	if exhaustive || max_samples == 0 || max_samples >= total {
		for index in 0..total {
			if let Some(v) = value(index) {
				statistics.add(v);
			}
		}
		return statistics;
	}

	let stride = total as f64 / max_samples as f64;
	let mut position = 0.0;
	while position < total as f64 {
		if let Some(v) = value(position as usize) {
			statistics.add(v);
		}
		position += stride;
	}

	let sampled = statistics.count();
	if sampled >= max_samples as u64 {
		statistics.set_count(total as u64);
	} else {
		statistics.set_count((total as f64 * sampled as f64 / max_samples as f64) as u64);
	}

	statistics
}

/// Lazily evaluated statistics of one field.
///
/// Reads go through [`StatisticsCache::get_or_evaluate`], which runs the
/// scan only when nothing is cached. Any write to the field must call
/// [`StatisticsCache::invalidate`].
#[derive(Debug, Default)]
pub struct StatisticsCache {
	cached: OnceLock<Statistics>,
	scans: AtomicUsize,
}

impl Clone for StatisticsCache {
	fn clone(&self) -> Self {
		Self::default()
	}
}

impl StatisticsCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get_or_evaluate(&self, evaluate: impl FnOnce() -> Statistics) -> Statistics {
		*self.cached.get_or_init(|| {
			self.scans.fetch_add(1, Ordering::Relaxed);
			evaluate()
		})
	}

	pub fn is_evaluated(&self) -> bool {
		self.cached.get().is_some()
	}

	pub fn invalidate(&mut self) {
		self.cached.take();
	}

	/// Number of scans performed since this cache was created.
	pub fn scans(&self) -> usize {
		self.scans.load(Ordering::Relaxed)
	}
}

#[cfg(test)]
pub mod tests {
	use super::*;

	mod statistics {
		use super::*;

		#[test]
		fn test_empty() {
			let statistics = Statistics::new();
			assert!(statistics.is_empty());
			assert_eq!(statistics.mean(), 0.0);
			assert_eq!(statistics.variance(), 0.0);
		}

		#[test]
		fn test_moments() {
			let statistics = Statistics::evaluate([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
			assert_eq!(statistics.count(), 8);
			assert_eq!(statistics.min(), 2.0);
			assert_eq!(statistics.max(), 9.0);
			assert_eq!(statistics.range(), 7.0);
			assert_eq!(statistics.mean(), 5.0);
			assert_eq!(statistics.variance(), 4.0);
			assert_eq!(statistics.stddev(), 2.0);
		}

		#[test]
		fn test_set_count_keeps_mean() {
			let mut statistics = Statistics::evaluate([1.0, 2.0, 3.0]);
			statistics.set_count(300);
			assert_eq!(statistics.count(), 300);
			assert!((statistics.mean() - 2.0).abs() < 1e-12);
			assert!((statistics.sum() - 600.0).abs() < 1e-9);
		}
	}

	mod sampling {
		use super::*;

		#[test]
		fn test_no_cap_visits_every_row() {
			let mut visited = 0;
			let statistics = scan(500, 0, false, |i| {
				visited += 1;
				Some(i as f64)
			});
			assert_eq!(visited, 500);
			assert_eq!(statistics.count(), 500);
			assert_eq!(statistics.max(), 499.0);
		}

		#[test]
		fn test_exhaustive_ignores_cap() {
			let statistics = scan(1000, 10, true, |i| Some(i as f64));
			assert_eq!(statistics.count(), 1000);
		}

		#[test]
		fn test_cap_visits_stride() {
			let mut visited = Vec::new();
			let statistics = scan(1000, 10, false, |i| {
				visited.push(i);
				Some(1.0)
			});
			assert_eq!(visited, vec![0, 100, 200, 300, 400, 500, 600, 700, 800, 900]);
			assert_eq!(statistics.count(), 1000);
			assert_eq!(statistics.mean(), 1.0);
		}

		#[test]
		fn test_skipped_samples_scale_count() {
			let statistics = scan(1000, 10, false, |i| if i < 500 { None } else { Some(2.0) });
			assert_eq!(statistics.count(), 500);
			assert_eq!(statistics.mean(), 2.0);
		}

		#[test]
		fn test_empty_scan() {
			let statistics = scan(0, 10, false, |_| Some(1.0));
			assert!(statistics.is_empty());
		}
	}

	mod cache {
		use super::*;

		#[test]
		fn test_evaluates_once() {
			let cache = StatisticsCache::new();
			let first = cache.get_or_evaluate(|| Statistics::evaluate([1.0, 3.0]));
			let second = cache.get_or_evaluate(|| Statistics::evaluate([100.0]));

			assert_eq!(first, second);
			assert_eq!(cache.scans(), 1);
		}

		#[test]
		fn test_invalidate_forces_scan() {
			let mut cache = StatisticsCache::new();
			cache.get_or_evaluate(|| Statistics::evaluate([1.0]));
			cache.invalidate();
			assert!(!cache.is_evaluated());

			let statistics = cache.get_or_evaluate(|| Statistics::evaluate([5.0]));
			assert_eq!(statistics.max(), 5.0);
			assert_eq!(cache.scans(), 2);
		}

		#[test]
		fn test_clone_starts_fresh() {
			let cache = StatisticsCache::new();
			cache.get_or_evaluate(|| Statistics::evaluate([1.0]));
			let cloned = cache.clone();
			assert!(!cloned.is_evaluated());
			assert_eq!(cloned.scans(), 0);
		}
	}
}
