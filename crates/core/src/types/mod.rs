//! Shared value types for the controllers.

mod option;

pub use option::{OptionKey, SelectOption};

/// Direction of a highlight or keyboard move through a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// Towards the end of the list.
	Forward,
	/// Towards the start of the list.
	Backward,
}

impl Direction {
	/// Step `index` one position in this direction within `len` items,
	/// wrapping past either end.
	///
	/// Returns `None` when the list is empty.
	#[must_use]
	pub fn step_wrapping(self, index: usize, len: usize) -> Option<usize> {
		if len == 0 {
			return None;
		}
		let index = index % len;
		Some(match self {
			Direction::Forward => (index + 1) % len,
			Direction::Backward => (index + len - 1) % len,
		})
	}
}

/// Extension point where the caller supplies the presentation for a state
/// snapshot.
///
/// Controllers hand their snapshot to a slot and return whatever the slot
/// produces; they never decide on markup themselves. Any `FnMut(&S) -> O`
/// closure is a slot.
pub trait Slot<S: ?Sized> {
	/// The view produced from a snapshot.
	type Output;

	/// Build a view for the given snapshot.
	fn fill(&mut self, state: &S) -> Self::Output;
}

impl<S: ?Sized, O, F> Slot<S> for F
where
	F: FnMut(&S) -> O,
{
	type Output = O;

	fn fill(&mut self, state: &S) -> O {
		self(state)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stepping_wraps_at_both_ends() {
		assert_eq!(Direction::Forward.step_wrapping(2, 3), Some(0));
		assert_eq!(Direction::Backward.step_wrapping(0, 3), Some(2));
		assert_eq!(Direction::Forward.step_wrapping(0, 0), None);
	}

	#[test]
	fn stepping_len_times_returns_to_start() {
		let len = 5;
		let mut index = 3;
		for _ in 0..len {
			index = Direction::Forward.step_wrapping(index, len).expect("non-empty");
		}
		assert_eq!(index, 3);
	}
}
