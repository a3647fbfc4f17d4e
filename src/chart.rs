//! Explicit per-chart view state.
//!
//! Zoom factors and category visibility are owned values, one set per chart instance and
//! passed to the handlers that need them, rather than top-level variables captured by every
//! handler and redeclared chart to chart.

use hashbrown::HashSet;

/// A chart's pan/zoom state: a uniform scale and a translation applied to already-projected
/// coordinates. No projection mathematics live here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
	scale: f64,
	translate: (f64, f64),
	scale_extent: (f64, f64),
}

impl Default for ZoomTransform {
	/// The identity transform with an unbounded scale extent.
	fn default() -> Self {
		Self::new((0.0, f64::INFINITY))
	}
}

impl ZoomTransform {
	/// The identity transform; `scale_extent` bounds every later [`zoomed`](`ZoomTransform::zoomed`).
	#[must_use]
	pub fn new(scale_extent: (f64, f64)) -> Self {
		Self {
			scale: 1.0,
			translate: (0.0, 0.0),
			scale_extent,
		}
	}

	#[must_use]
	pub fn scale(&self) -> f64 {
		self.scale
	}

	#[must_use]
	pub fn translate(&self) -> (f64, f64) {
		self.translate
	}

	/// Records a zoom event, clamping `scale` into the scale extent.
	pub fn zoomed(&mut self, scale: f64, translate: (f64, f64)) {
		self.scale = scale.clamp(self.scale_extent.0, self.scale_extent.1);
		self.translate = translate;
	}

	/// Maps a projected point into screen space.
	#[must_use]
	pub fn apply(&self, point: (f64, f64)) -> (f64, f64) {
		(point.0 * self.scale + self.translate.0, point.1 * self.scale + self.translate.1)
	}

	/// Divides a screen-space length by the scale, so strokes and point radii keep their
	/// apparent size while zoomed.
	#[must_use]
	pub fn compensate(&self, length: f64) -> f64 {
		length / self.scale
	}
}

/// Which record categories are visible, as toggled by the chart's checkboxes.
///
/// Filtering is a data change: callers drop hidden records before reconciling (or map
/// visibility to an attribute), the filter itself never touches the scene.
#[derive(Clone, Debug, Default)]
pub struct CategoryFilter {
	hidden: HashSet<String>,
}

impl CategoryFilter {
	/// Everything visible.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Unknown categories are visible.
	#[must_use]
	pub fn is_visible(&self, category: &str) -> bool {
		!self.hidden.contains(category)
	}

	pub fn set_visible(&mut self, category: &str, visible: bool) {
		if visible {
			self.hidden.remove(category);
		} else {
			self.hidden.insert(category.to_owned());
		}
	}

	/// Flips one category's visibility, returning the new state.
	pub fn toggle(&mut self, category: &str) -> bool {
		if self.hidden.remove(category) {
			true
		} else {
			self.hidden.insert(category.to_owned());
			false
		}
	}

	#[must_use]
	pub fn hidden_len(&self) -> usize {
		self.hidden.len()
	}

	/// Drops hidden records in place, ahead of a reconciliation pass.
	pub fn apply_to<R, F>(&self, records: &mut Vec<R>, mut category_of: F)
	where
		F: FnMut(&R) -> &str,
	{
		records.retain(|record| self.is_visible(category_of(record)));
	}
}
