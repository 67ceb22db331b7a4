use super::geometry::Orientation;
use super::interaction::{Interaction, SortableItem};

/// How an item should be presented in the current interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRole {
	/// Sortable and not involved in the interaction.
	Normal,
	/// Pinned in place; never moves.
	Pinned,
	/// Keyboard focus while selecting.
	Focused,
	/// The item being grabbed or dragged.
	Moving,
	/// The item that was just dropped.
	Settling,
}

/// Borrowed view of a [`SortableController`](super::SortableController)
/// handed to render slots.
#[derive(Debug, Clone)]
pub struct SortableSnapshot<'a, T> {
	/// Items in committed order.
	pub items: &'a [SortableItem<T>],
	pub interaction: Interaction,
	/// List indices in display order, with a moving item shown at its drop
	/// position.
	pub order: Vec<usize>,
	/// List indices of the sortable items.
	pub slots: Vec<usize>,
	pub orientation: Orientation,
	/// Latest live-region message.
	pub announcement: Option<&'a str>,
}

impl<'a, T> SortableSnapshot<'a, T> {
	/// Items in display order paired with their committed list index.
	pub fn display_items(&self) -> impl Iterator<Item = (usize, &'a SortableItem<T>)> + '_ {
		let items = self.items;
		self.order.iter().map(move |&index| (index, &items[index]))
	}

	/// Role of the item at committed list index `index`.
	#[must_use]
	pub fn role(&self, index: usize) -> ItemRole {
		let Some(position) = self.slots.iter().position(|&slot| slot == index) else {
			return ItemRole::Pinned;
		};
		match self.interaction {
			Interaction::Selecting { focus } if focus == position => ItemRole::Focused,
			Interaction::Grabbed { drag, .. } | Interaction::Dragging { drag, .. }
				if drag == position =>
			{
				ItemRole::Moving
			}
			Interaction::Settling { index, .. } if index == position => ItemRole::Settling,
			_ => ItemRole::Normal,
		}
	}
}
