use serde::{Deserialize, Serialize};

/// Axis along which a sortable list is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
	/// Items stacked top to bottom.
	#[default]
	Vertical,
	/// Items laid out left to right.
	Horizontal,
}

/// Pointer position in the caller's coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Bounding box of a rendered item.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	#[must_use]
	pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Whether `point` lies inside the box (right/bottom edges exclusive).
	#[must_use]
	pub fn contains(&self, point: Point) -> bool {
		point.x >= self.x
			&& point.x < self.x + self.width
			&& point.y >= self.y
			&& point.y < self.y + self.height
	}
}

impl Orientation {
	/// Whether `pointer` sits before the midpoint of `bounds` along this axis.
	#[must_use]
	pub fn is_before_midpoint(self, pointer: Point, bounds: Bounds) -> bool {
		match self {
			Orientation::Vertical => pointer.y < bounds.y + bounds.height / 2.0,
			Orientation::Horizontal => pointer.x < bounds.x + bounds.width / 2.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn midpoint_uses_the_layout_axis() {
		let bounds = Bounds::new(0.0, 10.0, 40.0, 2.0);
		assert!(Orientation::Vertical.is_before_midpoint(Point::new(35.0, 10.5), bounds));
		assert!(!Orientation::Vertical.is_before_midpoint(Point::new(5.0, 11.0), bounds));
		assert!(Orientation::Horizontal.is_before_midpoint(Point::new(5.0, 11.5), bounds));
		assert!(!Orientation::Horizontal.is_before_midpoint(Point::new(20.0, 10.0), bounds));
	}

	#[test]
	fn contains_excludes_far_edges() {
		let bounds = Bounds::new(2.0, 2.0, 3.0, 1.0);
		assert!(bounds.contains(Point::new(2.0, 2.0)));
		assert!(!bounds.contains(Point::new(5.0, 2.0)));
		assert!(!bounds.contains(Point::new(2.0, 3.0)));
	}
}
