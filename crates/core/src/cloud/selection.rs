// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Geocloud

use geocloud_type::{Error, Point2, Rect, Result};
use tracing::debug;

use super::PointCloud;

impl PointCloud {
	/// Toggles the selection of one point. Unless `invert` is set the
	/// current selection is cleared first.
	pub fn select(&mut self, point: usize, invert: bool) -> Result<()> {
		if point >= self.records.len() {
			return Err(Error::PointOutOfRange {
				index: point,
				count: self.records.len(),
			});
		}

		if !invert {
			self.clear_selection();
		}
		self.toggle(point);
		Ok(())
	}

	/// Toggles every point whose X and Y lie inside `rect`, bounds
	/// included. Returns the resulting selection count.
	pub fn select_rect(&mut self, rect: Rect, invert: bool) -> usize {
		if !invert {
			self.clear_selection();
		}

		if !self.is_empty() && rect.intersects(&self.extent()) {
			for point in 0..self.records.len() {
				if rect.contains(self.get_x(point), self.get_y(point)) {
					self.toggle(point);
				}
			}
		}

		self.selection.len()
	}

	/// Toggles every point located exactly at `location`.
	pub fn select_point(&mut self, location: Point2, invert: bool) -> usize {
		self.select_rect(Rect::around(location, 0.0), invert)
	}

	pub fn clear_selection(&mut self) {
		for &point in &self.selection {
			if let Some(record) = self.records.get_mut(point) {
				record.set_selected(false);
			}
		}
		self.selection.clear();
	}

	pub fn is_selected(&self, point: usize) -> bool {
		self.records.get(point).is_some_and(|record| record.is_selected())
	}

	pub fn selection_count(&self) -> usize {
		self.selection.len()
	}

	/// Point index of the `n`th selected point, in selection order.
	pub fn selection_index(&self, n: usize) -> Option<usize> {
		self.selection.get(n).copied()
	}

	pub fn selection(&self) -> &[usize] {
		&self.selection
	}

	/// X/Y bounding box of the selected points; all zero without selection.
	pub fn selection_extent(&self) -> Rect {
		let mut points = self.selection.iter().map(|&point| (self.get_x(point), self.get_y(point)));
		let Some((x, y)) = points.next() else {
			return Rect::default();
		};

		let mut extent = Rect::new(x, y, x, y);
		for (x, y) in points {
			extent.expand(x, y);
		}
		extent
	}

	/// Removes all selected points and returns how many were removed.
	pub fn del_selection(&mut self) -> usize {
		if self.selection.is_empty() {
			return 0;
		}

		let before = self.records.len();
		self.records.retain(|record| !record.is_selected());
		self.selection.clear();
		self.cursor = None;
		self.on_points_changed();

		let removed = before - self.records.len();
		debug!(removed, "selection deleted");
		removed
	}

	/// Selects every unselected point and deselects the others. Returns the
	/// new selection count.
	pub fn inv_selection(&mut self) -> usize {
		let mut selection = Vec::with_capacity(self.records.len() - self.selection.len());
		for (point, record) in self.records.iter_mut().enumerate() {
			let selected = !record.is_selected();
			record.set_selected(selected);
			if selected {
				selection.push(point);
			}
		}
		self.selection = selection;
		self.selection.len()
	}

	fn toggle(&mut self, point: usize) {
		let Some(record) = self.records.get_mut(point) else {
			return;
		};

		if record.is_selected() {
			record.set_selected(false);
			self.selection.retain(|&selected| selected != point);
		} else {
			record.set_selected(true);
			self.selection.push(point);
		}
	}
}

#[cfg(test)]
pub mod tests {
	use geocloud_type::{Point2, Rect};

	use crate::cloud::tests::grid;

	#[test]
	fn test_select_replaces_selection() {
		let mut cloud = grid(3);
		cloud.select(1, false).unwrap();
		cloud.select(4, false).unwrap();
		assert_eq!(cloud.selection(), &[4]);
		assert!(cloud.is_selected(4));
		assert!(!cloud.is_selected(1));
	}

	#[test]
	fn test_select_invert_toggles() {
		let mut cloud = grid(3);
		cloud.select(1, true).unwrap();
		cloud.select(2, true).unwrap();
		assert_eq!(cloud.selection_count(), 2);

		cloud.select(1, true).unwrap();
		assert_eq!(cloud.selection(), &[2]);
		assert!(cloud.select(9, true).is_err());
		assert_eq!(cloud.selection(), &[2]);
	}

	#[test]
	fn test_select_rect_counts_points_inside() {
		let mut cloud = grid(10);
		let count = cloud.select_rect(Rect::new(2.0, 3.0, 4.5, 5.0), false);
		assert_eq!(count, 3 * 3);
		for point in cloud.selection().to_vec() {
			let (x, y) = (cloud.get_x(point), cloud.get_y(point));
			assert!((2.0..=4.5).contains(&x));
			assert!((3.0..=5.0).contains(&y));
		}
	}

	#[test]
	fn test_select_rect_invert_toggles_overlap() {
		let mut cloud = grid(4);
		cloud.select_rect(Rect::new(0.0, 0.0, 1.0, 1.0), false);
		let count = cloud.select_rect(Rect::new(1.0, 1.0, 2.0, 2.0), true);
		// (1, 1) was selected and is toggled off
		assert_eq!(count, 4 + 4 - 2);
		assert!(!cloud.is_selected(5));
	}

	#[test]
	fn test_select_rect_outside_clears() {
		let mut cloud = grid(4);
		cloud.select(0, false).unwrap();
		assert_eq!(cloud.select_rect(Rect::new(50.0, 50.0, 60.0, 60.0), false), 0);
		assert!(!cloud.is_selected(0));
	}

	#[test]
	fn test_select_point() {
		let mut cloud = grid(4);
		assert_eq!(cloud.select_point(Point2::new(2.0, 1.0), false), 1);
		assert_eq!(cloud.selection(), &[6]);
	}

	#[test]
	fn test_double_inversion_restores() {
		let mut cloud = grid(5);
		cloud.select_rect(Rect::new(0.0, 0.0, 2.0, 1.0), false);
		let mut original = cloud.selection().to_vec();
		original.sort();

		assert_eq!(cloud.inv_selection(), 25 - original.len());
		assert!(original.iter().all(|&point| !cloud.is_selected(point)));

		cloud.inv_selection();
		let mut restored = cloud.selection().to_vec();
		restored.sort();
		assert_eq!(restored, original);
	}

	#[test]
	fn test_selection_extent() {
		let mut cloud = grid(5);
		assert_eq!(cloud.selection_extent(), Rect::default());
		cloud.select(6, true).unwrap();
		cloud.select(18, true).unwrap();
		assert_eq!(cloud.selection_extent(), Rect::new(1.0, 1.0, 3.0, 3.0));
	}

	#[test]
	fn test_del_selection() {
		let mut cloud = grid(3);
		cloud.select_rect(Rect::new(0.0, 0.0, 2.0, 0.0), false);
		assert_eq!(cloud.del_selection(), 3);
		assert_eq!(cloud.point_count(), 6);
		assert_eq!(cloud.selection_count(), 0);
		assert!((0..6).all(|point| cloud.get_y(point) > 0.0));
		assert_eq!(cloud.del_selection(), 0);
	}

	#[test]
	fn test_del_point_shifts_selection() {
		let mut cloud = grid(3);
		cloud.select(2, true).unwrap();
		cloud.select(7, true).unwrap();
		cloud.select(5, true).unwrap();

		cloud.del_point(2).unwrap();
		assert_eq!(cloud.selection(), &[6, 4]);
		assert!(cloud.is_selected(6));
		assert!(cloud.is_selected(4));
		assert_eq!(cloud.selection_count(), 2);
	}
}
