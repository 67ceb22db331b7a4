use std::time::Instant;

/// Value plus its sortable flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortableItem<T> {
	pub value: T,
	/// Non-sortable items never move and are never drag sources or targets.
	pub sortable: bool,
}

impl<T> SortableItem<T> {
	/// An item that takes part in reordering.
	pub fn new(value: T) -> Self {
		Self {
			value,
			sortable: true,
		}
	}

	/// An item pinned to its position.
	pub fn pinned(value: T) -> Self {
		Self {
			value,
			sortable: false,
		}
	}
}

impl<T> From<T> for SortableItem<T> {
	fn from(value: T) -> Self {
		Self::new(value)
	}
}

/// Where the reorder interaction currently stands.
///
/// All indices are positions in the sortable sequence, i.e. counting only
/// items whose `sortable` flag is set. `drop` is the position the dragged item
/// will occupy once committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interaction {
	/// Nothing focused or moving.
	#[default]
	Idle,
	/// Keyboard focus is on an item; arrows move the focus.
	Selecting { focus: usize },
	/// Keyboard grab in progress; arrows move the drop position.
	Grabbed { drag: usize, drop: usize },
	/// Pointer drag in progress.
	Dragging { drag: usize, drop: usize },
	/// A drop just landed at `index`; cleared once `until` passes.
	Settling { index: usize, until: Instant },
}

impl Interaction {
	/// `(drag, drop)` while a move is in progress.
	#[must_use]
	pub fn move_in_progress(&self) -> Option<(usize, usize)> {
		match *self {
			Interaction::Grabbed { drag, drop } | Interaction::Dragging { drag, drop } => {
				Some((drag, drop))
			}
			_ => None,
		}
	}

	/// Keyboard-focused position, if any.
	#[must_use]
	pub fn focus(&self) -> Option<usize> {
		match *self {
			Interaction::Selecting { focus } => Some(focus),
			_ => None,
		}
	}
}

/// Keys understood by [`SortableController::handle_key`](super::SortableController::handle_key).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
	Up,
	Down,
	Left,
	Right,
	/// Grab the focused item, or drop the grabbed one.
	Space,
	/// Abandon the current selection or grab.
	Escape,
}
