use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::geometry::Orientation;

/// Behavioural switches for a [`SortableController`](super::SortableController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortableConfig {
	/// Layout axis; picks the arrow keys and the midpoint axis.
	pub orientation: Orientation,
	/// Minimum spacing between applied pointer drop-target updates.
	pub drag_throttle_ms: u64,
	/// How long a dropped item keeps its settling state before going idle.
	pub settle_delay_ms: u64,
}

impl Default for SortableConfig {
	fn default() -> Self {
		Self {
			orientation: Orientation::Vertical,
			drag_throttle_ms: 16,
			settle_delay_ms: 150,
		}
	}
}

impl SortableConfig {
	/// Configuration for a left-to-right list.
	#[must_use]
	pub fn horizontal() -> Self {
		Self {
			orientation: Orientation::Horizontal,
			..Self::default()
		}
	}

	#[must_use]
	pub fn drag_throttle(&self) -> Duration {
		Duration::from_millis(self.drag_throttle_ms)
	}

	#[must_use]
	pub fn settle_delay(&self) -> Duration {
		Duration::from_millis(self.settle_delay_ms)
	}
}
