// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use std::io::{self, Read};

/// Reader that records how often and how much it was read.
pub struct CountingReader<R> {
	inner: R,
	reads: usize,
	bytes: u64,
}

impl<R: Read> CountingReader<R> {
	pub fn new(inner: R) -> Self {
		Self {
			inner,
			reads: 0,
			bytes: 0,
		}
	}

	pub fn reads(&self) -> usize {
		self.reads
	}

	pub fn bytes(&self) -> u64 {
		self.bytes
	}

	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl<R: Read> Read for CountingReader<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let n = self.inner.read(buf)?;
		self.reads += 1;
		self.bytes += n as u64;
		Ok(n)
	}
}

/// Reader that never returns more than `chunk` bytes per call, to exercise
/// short reads.
pub struct ChunkedReader<R> {
	inner: R,
	chunk: usize,
}

impl<R: Read> ChunkedReader<R> {
	pub fn new(inner: R, chunk: usize) -> Self {
		Self {
			inner,
			chunk: chunk.max(1),
		}
	}
}

impl<R: Read> Read for ChunkedReader<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let len = buf.len().min(self.chunk);
		self.inner.read(&mut buf[..len])
	}
}
