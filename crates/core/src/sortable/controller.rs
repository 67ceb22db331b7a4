use std::time::Instant;

use super::config::SortableConfig;
use super::geometry::{Bounds, Orientation, Point};
use super::interaction::{Interaction, SortKey, SortableItem};
use super::snapshot::SortableSnapshot;
use crate::timing::Throttle;
use crate::types::{Direction, Slot};

/// Pointer sample waiting to be applied as a drop target.
#[derive(Debug, Clone, Copy)]
struct DropTarget {
	pointer: Point,
	candidate: usize,
	bounds: Bounds,
}

/// State machine behind a reorderable list.
///
/// Pointer drags and the keyboard grab/move/drop cycle both end in
/// [`commit`](Self::commit), which permutes the sortable items and hands the
/// new order back. Pinned items keep their absolute positions throughout.
#[derive(Debug)]
pub struct SortableController<T> {
	config: SortableConfig,
	items: Vec<SortableItem<T>>,
	interaction: Interaction,
	pending_target: Throttle<DropTarget>,
	last_focus: Option<usize>,
	announcement: Option<String>,
}

impl<T> SortableController<T> {
	/// Create a controller over `items`.
	pub fn new(items: impl IntoIterator<Item = SortableItem<T>>, config: SortableConfig) -> Self {
		let pending_target = Throttle::new(config.drag_throttle());
		Self {
			config,
			items: items.into_iter().collect(),
			interaction: Interaction::Idle,
			pending_target,
			last_focus: None,
			announcement: None,
		}
	}

	/// Create a controller where every value is sortable.
	pub fn from_values(values: impl IntoIterator<Item = T>, config: SortableConfig) -> Self {
		Self::new(values.into_iter().map(SortableItem::new), config)
	}

	#[must_use]
	pub fn config(&self) -> &SortableConfig {
		&self.config
	}

	#[must_use]
	pub fn orientation(&self) -> Orientation {
		self.config.orientation
	}

	/// Items in their committed order.
	#[must_use]
	pub fn items(&self) -> &[SortableItem<T>] {
		&self.items
	}

	/// Values in their committed order.
	pub fn values(&self) -> impl Iterator<Item = &T> {
		self.items.iter().map(|item| &item.value)
	}

	/// Consume the controller, returning the items in committed order.
	#[must_use]
	pub fn into_items(self) -> Vec<SortableItem<T>> {
		self.items
	}

	#[must_use]
	pub fn interaction(&self) -> Interaction {
		self.interaction
	}

	/// Position of the item being moved.
	#[must_use]
	pub fn drag_index(&self) -> Option<usize> {
		self.interaction.move_in_progress().map(|(drag, _)| drag)
	}

	/// Position the moved item lands at if committed now.
	#[must_use]
	pub fn drop_index(&self) -> Option<usize> {
		self.interaction.move_in_progress().map(|(_, drop)| drop)
	}

	/// Keyboard-focused position while selecting.
	#[must_use]
	pub fn selected_index(&self) -> Option<usize> {
		self.interaction.focus()
	}

	/// Latest live-region message.
	#[must_use]
	pub fn announcement(&self) -> Option<&str> {
		self.announcement.as_deref()
	}

	/// Number of items that take part in reordering.
	#[must_use]
	pub fn sortable_len(&self) -> usize {
		self.items.iter().filter(|item| item.sortable).count()
	}

	/// List indices of the sortable items, in order.
	#[must_use]
	pub fn sortable_slots(&self) -> Vec<usize> {
		self.items
			.iter()
			.enumerate()
			.filter(|(_, item)| item.sortable)
			.map(|(index, _)| index)
			.collect()
	}

	/// Sortable position of the item at list index `index`.
	#[must_use]
	pub fn position_of(&self, index: usize) -> Option<usize> {
		if !self.items.get(index)?.sortable {
			return None;
		}
		Some(self.items[..index].iter().filter(|item| item.sortable).count())
	}

	/// List index of the item at sortable position `position`.
	#[must_use]
	pub fn index_of(&self, position: usize) -> Option<usize> {
		self.sortable_slots().get(position).copied()
	}

	/// Start a pointer drag on the item at list index `index`.
	///
	/// Returns `false` for pinned or out-of-range items.
	pub fn begin_drag(&mut self, index: usize) -> bool {
		let Some(position) = self.position_of(index) else {
			return false;
		};
		self.pending_target.reset();
		self.interaction = Interaction::Dragging {
			drag: position,
			drop: position,
		};
		tracing::trace!(position, "drag started");
		true
	}

	/// Feed a pointer sample over the item at list index `candidate` whose
	/// rendered box is `bounds`.
	///
	/// Samples are rate-limited; ones arriving inside the throttle interval
	/// are held and applied by [`tick`](Self::tick) or [`commit`](Self::commit).
	/// Returns whether the drop position changed.
	pub fn update_drop_target(
		&mut self,
		pointer: Point,
		candidate: usize,
		bounds: Bounds,
		now: Instant,
	) -> bool {
		if !matches!(self.interaction, Interaction::Dragging { .. }) {
			return false;
		}
		let target = DropTarget {
			pointer,
			candidate,
			bounds,
		};
		match self.pending_target.offer(target, now) {
			Some(target) => self.apply_drop_target(target),
			None => false,
		}
	}

	fn apply_drop_target(&mut self, target: DropTarget) -> bool {
		let Interaction::Dragging { drag, drop } = self.interaction else {
			return false;
		};
		let Some(candidate) = self.position_of(target.candidate) else {
			return false;
		};

		let before = self
			.config
			.orientation
			.is_before_midpoint(target.pointer, target.bounds);
		let next = drop_position(drag, candidate, before).min(self.sortable_len().saturating_sub(1));
		if next == drop {
			return false;
		}
		tracing::trace!(drag, candidate, before, drop = next, "drop target updated");
		self.interaction = Interaction::Dragging { drag, drop: next };
		true
	}

	/// Advance time: apply a held pointer sample and finish settling.
	/// Returns whether visible state changed.
	pub fn tick(&mut self, now: Instant) -> bool {
		let mut changed = match self.pending_target.poll(now) {
			Some(target) => self.apply_drop_target(target),
			None => false,
		};
		if let Interaction::Settling { until, .. } = self.interaction {
			if now >= until {
				self.interaction = Interaction::Idle;
				changed = true;
			}
		}
		changed
	}

	/// Drop the moving item. Returns the reordered values when the order
	/// changed; the move state is cleared either way.
	pub fn commit(&mut self, now: Instant) -> Option<Vec<T>>
	where
		T: Clone,
	{
		if let Some(target) = self.pending_target.flush() {
			self.apply_drop_target(target);
		}
		let (drag, drop) = self.interaction.move_in_progress()?;
		let total = self.sortable_len();
		self.interaction = Interaction::Settling {
			index: drop,
			until: now + self.config.settle_delay(),
		};
		self.last_focus = Some(drop);

		if drag == drop {
			self.announce(format!(
				"Item returned to position {} of {total}.",
				drag + 1
			));
			return None;
		}

		let slots = self.sortable_slots();
		move_within_slots(&mut self.items, &slots, drag, drop);
		self.announce(format!("Dropped item at position {} of {total}.", drop + 1));
		tracing::debug!(from = drag, to = drop, "order committed");
		Some(self.items.iter().map(|item| item.value.clone()).collect())
	}

	/// Abandon the current move or selection without touching the order.
	pub fn cancel(&mut self) {
		if let Some((drag, _)) = self.interaction.move_in_progress() {
			self.last_focus = Some(drag);
			self.announce("Reorder cancelled.".to_string());
		} else if let Some(focus) = self.interaction.focus() {
			self.last_focus = Some(focus);
		}
		self.pending_target.reset();
		self.interaction = Interaction::Idle;
	}

	/// Apply a keyboard key. Returns the reordered values when a drop changed
	/// the order.
	pub fn handle_key(&mut self, key: SortKey, now: Instant) -> Option<Vec<T>>
	where
		T: Clone,
	{
		let total = self.sortable_len();
		if total == 0 {
			return None;
		}

		match key {
			SortKey::Escape => {
				self.cancel();
				None
			}
			SortKey::Space => {
				match self.interaction {
					Interaction::Selecting { focus } => {
						self.interaction = Interaction::Grabbed {
							drag: focus,
							drop: focus,
						};
						self.announce(format!(
							"Grabbed item at position {} of {total}.",
							focus + 1
						));
						None
					}
					Interaction::Grabbed { .. } => self.commit(now),
					_ => None,
				}
			}
			arrow => {
				let direction = self.direction_for(arrow)?;
				match self.interaction {
					Interaction::Idle | Interaction::Settling { .. } => {
						let focus = match (self.last_focus, direction) {
							(Some(focus), _) => focus % total,
							(None, Direction::Forward) => 0,
							(None, Direction::Backward) => total - 1,
						};
						self.last_focus = Some(focus);
						self.interaction = Interaction::Selecting { focus };
					}
					Interaction::Selecting { focus } => {
						let focus = direction.step_wrapping(focus, total)?;
						self.last_focus = Some(focus);
						self.interaction = Interaction::Selecting { focus };
					}
					Interaction::Grabbed { drag, drop } => {
						let drop = direction.step_wrapping(drop, total)?;
						self.interaction = Interaction::Grabbed { drag, drop };
						self.announce(format!("Moved to position {} of {total}.", drop + 1));
					}
					Interaction::Dragging { .. } => {}
				}
				None
			}
		}
	}

	fn direction_for(&self, key: SortKey) -> Option<Direction> {
		match (self.config.orientation, key) {
			(Orientation::Vertical, SortKey::Up) | (Orientation::Horizontal, SortKey::Left) => {
				Some(Direction::Backward)
			}
			(Orientation::Vertical, SortKey::Down)
			| (Orientation::Horizontal, SortKey::Right) => Some(Direction::Forward),
			_ => None,
		}
	}

	fn announce(&mut self, message: String) {
		tracing::trace!(%message, "announce");
		self.announcement = Some(message);
	}

	/// Borrowed view of the current state, including the preview order.
	#[must_use]
	pub fn snapshot(&self) -> SortableSnapshot<'_, T> {
		let mut order: Vec<usize> = (0..self.items.len()).collect();
		if let Some((drag, drop)) = self.interaction.move_in_progress() {
			move_within_slots(&mut order, &self.sortable_slots(), drag, drop);
		}
		SortableSnapshot {
			items: &self.items,
			interaction: self.interaction,
			order,
			slots: self.sortable_slots(),
			orientation: self.config.orientation,
			announcement: self.announcement.as_deref(),
		}
	}

	/// Hand the current snapshot to a render slot.
	pub fn render<'s, S>(&'s self, slot: &mut S) -> S::Output
	where
		S: Slot<SortableSnapshot<'s, T>>,
	{
		slot.fill(&self.snapshot())
	}
}

/// Drop position for a pointer over `candidate` while dragging `drag`.
///
/// Positions are expressed after removing the dragged item, so candidates
/// past the source shift down by one. Hovering the source itself keeps it in
/// place.
#[must_use]
pub fn drop_position(drag: usize, candidate: usize, before_midpoint: bool) -> usize {
	if candidate == drag {
		return drag;
	}
	let raw = if before_midpoint {
		candidate
	} else {
		candidate + 1
	};
	if candidate > drag { raw - 1 } else { raw }
}

/// Move the entry at sortable position `from` to position `to`, permuting only
/// the entries at `slots`.
fn move_within_slots<U>(entries: &mut [U], slots: &[usize], from: usize, to: usize) {
	if from >= slots.len() || to >= slots.len() {
		return;
	}
	if from < to {
		for position in from..to {
			entries.swap(slots[position], slots[position + 1]);
		}
	} else {
		for position in (to..from).rev() {
			entries.swap(slots[position], slots[position + 1]);
		}
	}
}
