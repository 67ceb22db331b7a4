use std::time::{Duration, Instant};

use super::*;

fn rows(count: usize) -> Vec<Bounds> {
	(0..count)
		.map(|row| Bounds::new(0.0, row as f64 * 2.0, 20.0, 2.0))
		.collect()
}

/// Pointer in the lower half of `bounds`.
fn lower_half(bounds: Bounds) -> Point {
	Point::new(1.0, bounds.y + bounds.height * 0.75)
}

/// Pointer in the upper half of `bounds`.
fn upper_half(bounds: Bounds) -> Point {
	Point::new(1.0, bounds.y + bounds.height * 0.25)
}

fn abcd() -> SortableController<char> {
	SortableController::from_values(['a', 'b', 'c', 'd'], SortableConfig::default())
}

fn values(controller: &SortableController<char>) -> String {
	controller.values().collect()
}

#[test]
fn dragging_past_midpoint_of_later_item_excludes_source() {
	let mut controller = abcd();
	let bounds = rows(4);
	let now = Instant::now();

	assert!(controller.begin_drag(0));
	assert_eq!(controller.drag_index(), Some(0));
	assert_eq!(controller.drop_index(), Some(0));

	controller.update_drop_target(lower_half(bounds[2]), 2, bounds[2], now);
	assert_eq!(controller.drop_index(), Some(2));

	let reordered = controller.commit(now).expect("order changed");
	assert_eq!(reordered, ['b', 'c', 'a', 'd']);
	assert_eq!(controller.drag_index(), None);
	assert_eq!(controller.drop_index(), None);
}

#[test]
fn dragging_upwards_lands_before_hovered_item() {
	let mut controller = abcd();
	let bounds = rows(4);
	let now = Instant::now();

	controller.begin_drag(3);
	controller.update_drop_target(upper_half(bounds[1]), 1, bounds[1], now);
	assert_eq!(controller.drop_index(), Some(1));
	assert_eq!(controller.commit(now).expect("moved"), ['a', 'd', 'b', 'c']);
}

#[test]
fn commit_without_movement_is_a_no_op() {
	let mut controller = abcd();
	let now = Instant::now();

	controller.begin_drag(1);
	assert_eq!(controller.commit(now), None);
	assert_eq!(values(&controller), "abcd");
	assert_eq!(controller.drag_index(), None);

	assert_eq!(controller.commit(now), None, "second commit has nothing to do");
	assert_eq!(values(&controller), "abcd");
}

#[test]
fn hovering_the_source_keeps_it_in_place() {
	let mut controller = abcd();
	let bounds = rows(4);
	controller.begin_drag(1);
	controller.update_drop_target(lower_half(bounds[1]), 1, bounds[1], Instant::now());
	assert_eq!(controller.drop_index(), Some(1));
}

#[test]
fn pointer_updates_are_throttled_and_flushed_on_tick() {
	let mut controller = abcd();
	let bounds = rows(4);
	let start = Instant::now();

	controller.begin_drag(0);
	assert!(controller.update_drop_target(lower_half(bounds[1]), 1, bounds[1], start));
	assert_eq!(controller.drop_index(), Some(1));

	let soon = start + Duration::from_millis(5);
	assert!(!controller.update_drop_target(lower_half(bounds[3]), 3, bounds[3], soon));
	assert_eq!(controller.drop_index(), Some(1), "held back by the throttle");

	assert!(!controller.tick(start + Duration::from_millis(10)));
	assert!(controller.tick(start + Duration::from_millis(16)));
	assert_eq!(controller.drop_index(), Some(3));
}

#[test]
fn commit_applies_held_pointer_sample() {
	let mut controller = abcd();
	let bounds = rows(4);
	let start = Instant::now();

	controller.begin_drag(0);
	controller.update_drop_target(upper_half(bounds[0]), 0, bounds[0], start);
	controller.update_drop_target(lower_half(bounds[3]), 3, bounds[3], start);

	let reordered = controller.commit(start).expect("moved to the end");
	assert_eq!(reordered, ['b', 'c', 'd', 'a']);
}

#[test]
fn settling_clears_after_delay() {
	let mut controller = abcd();
	let now = Instant::now();
	controller.begin_drag(0);
	controller.commit(now);
	assert!(matches!(
		controller.interaction(),
		Interaction::Settling { index: 0, .. }
	));

	assert!(!controller.tick(now + Duration::from_millis(100)));
	assert!(controller.tick(now + Duration::from_millis(150)));
	assert_eq!(controller.interaction(), Interaction::Idle);
}

#[test]
fn pinned_items_never_move_or_drag() {
	let items = vec![
		SortableItem::new('a'),
		SortableItem::pinned('P'),
		SortableItem::new('b'),
		SortableItem::new('c'),
	];
	let mut controller = SortableController::new(items, SortableConfig::default());
	let bounds = rows(4);
	let now = Instant::now();

	assert!(!controller.begin_drag(1));
	assert!(controller.begin_drag(0));

	assert!(!controller.update_drop_target(lower_half(bounds[1]), 1, bounds[1], now));
	assert_eq!(controller.drop_index(), Some(0));

	controller.update_drop_target(lower_half(bounds[3]), 3, bounds[3], now + Duration::from_millis(20));
	assert_eq!(controller.drop_index(), Some(2));

	let reordered = controller.commit(now).expect("moved");
	assert_eq!(reordered, ['b', 'P', 'c', 'a']);
	assert!(!controller.items()[1].sortable);
}

#[test]
fn keyboard_grab_move_drop_cycle() {
	let mut controller = abcd();
	let now = Instant::now();

	assert_eq!(controller.handle_key(SortKey::Down, now), None);
	assert_eq!(controller.selected_index(), Some(0));
	controller.handle_key(SortKey::Down, now);
	assert_eq!(controller.selected_index(), Some(1));

	controller.handle_key(SortKey::Space, now);
	assert_eq!(controller.drag_index(), Some(1));
	assert_eq!(
		controller.announcement(),
		Some("Grabbed item at position 2 of 4.")
	);

	controller.handle_key(SortKey::Down, now);
	controller.handle_key(SortKey::Down, now);
	assert_eq!(controller.drop_index(), Some(3));
	assert_eq!(controller.announcement(), Some("Moved to position 4 of 4."));

	let reordered = controller.handle_key(SortKey::Space, now).expect("dropped");
	assert_eq!(reordered, ['a', 'c', 'd', 'b']);
	assert_eq!(
		controller.announcement(),
		Some("Dropped item at position 4 of 4.")
	);
	assert_eq!(controller.drag_index(), None);
}

#[test]
fn keyboard_moves_wrap_around_the_ends() {
	let mut controller = abcd();
	let now = Instant::now();

	controller.handle_key(SortKey::Up, now);
	assert_eq!(controller.selected_index(), Some(3));
	controller.handle_key(SortKey::Down, now);
	assert_eq!(controller.selected_index(), Some(0));

	controller.handle_key(SortKey::Space, now);
	controller.handle_key(SortKey::Up, now);
	assert_eq!(controller.drop_index(), Some(3));

	let reordered = controller.handle_key(SortKey::Space, now).expect("wrapped move");
	assert_eq!(reordered, ['b', 'c', 'd', 'a']);
}

#[test]
fn escape_cancels_grab_without_reordering() {
	let mut controller = abcd();
	let now = Instant::now();

	controller.handle_key(SortKey::Down, now);
	controller.handle_key(SortKey::Space, now);
	controller.handle_key(SortKey::Down, now);
	assert_eq!(controller.handle_key(SortKey::Escape, now), None);

	assert_eq!(values(&controller), "abcd");
	assert_eq!(controller.interaction(), Interaction::Idle);
	assert_eq!(controller.announcement(), Some("Reorder cancelled."));
}

#[test]
fn horizontal_lists_use_left_and_right() {
	let mut controller =
		SortableController::from_values(['a', 'b', 'c'], SortableConfig::horizontal());
	let now = Instant::now();

	controller.handle_key(SortKey::Down, now);
	assert_eq!(controller.interaction(), Interaction::Idle);

	controller.handle_key(SortKey::Right, now);
	controller.handle_key(SortKey::Right, now);
	assert_eq!(controller.selected_index(), Some(1));
}

#[test]
fn keyboard_resumes_from_last_drop() {
	let mut controller = abcd();
	let now = Instant::now();

	controller.handle_key(SortKey::Down, now);
	controller.handle_key(SortKey::Space, now);
	controller.handle_key(SortKey::Down, now);
	controller.handle_key(SortKey::Space, now);

	controller.handle_key(SortKey::Down, now + Duration::from_millis(500));
	assert_eq!(controller.selected_index(), Some(1));
}

#[test]
fn focus_survives_escape_from_first_arrow() {
	let mut controller = abcd();
	let now = Instant::now();

	controller.handle_key(SortKey::Up, now);
	assert_eq!(controller.selected_index(), Some(3));
	controller.handle_key(SortKey::Escape, now);
	assert_eq!(controller.interaction(), Interaction::Idle);

	controller.handle_key(SortKey::Down, now);
	assert_eq!(controller.selected_index(), Some(3));
}

#[test]
fn focus_survives_escape_after_moving() {
	let mut controller = abcd();
	let now = Instant::now();

	controller.handle_key(SortKey::Down, now);
	controller.handle_key(SortKey::Down, now);
	controller.handle_key(SortKey::Escape, now);

	controller.handle_key(SortKey::Up, now);
	assert_eq!(controller.selected_index(), Some(1));
}

#[test]
fn snapshot_previews_drop_position() {
	let mut controller = abcd();
	let bounds = rows(4);
	controller.begin_drag(0);
	controller.update_drop_target(lower_half(bounds[2]), 2, bounds[2], Instant::now());

	let mut slot = |snapshot: &SortableSnapshot<'_, char>| -> String {
		snapshot
			.display_items()
			.map(|(index, item)| match snapshot.role(index) {
				ItemRole::Moving => item.value.to_ascii_uppercase(),
				_ => item.value,
			})
			.collect()
	};
	assert_eq!(controller.render(&mut slot), "bcAd");
	assert_eq!(values(&controller), "abcd", "preview does not commit");
}

#[test]
fn positions_skip_pinned_items() {
	let controller = SortableController::new(
		[
			SortableItem::new('a'),
			SortableItem::pinned('P'),
			SortableItem::new('b'),
		],
		SortableConfig::default(),
	);
	assert_eq!(controller.position_of(2), Some(1));
	assert_eq!(controller.position_of(1), None);
	assert_eq!(controller.index_of(1), Some(2));
	assert_eq!(controller.index_of(2), None);
}

#[test]
fn into_items_keeps_committed_order_and_flags() {
	let mut controller = SortableController::new(
		[
			SortableItem::new('a'),
			SortableItem::pinned('P'),
			SortableItem::new('b'),
		],
		SortableConfig::default(),
	);
	let now = Instant::now();
	for key in [SortKey::Down, SortKey::Space, SortKey::Down, SortKey::Space] {
		controller.handle_key(key, now);
	}

	let items = controller.into_items();
	let values: String = items.iter().map(|item| item.value).collect();
	assert_eq!(values, "bPa");
	assert!(!items[1].sortable);
}

#[test]
fn empty_list_ignores_keys() {
	let mut controller: SortableController<char> =
		SortableController::from_values([], SortableConfig::default());
	assert_eq!(controller.handle_key(SortKey::Down, Instant::now()), None);
	assert_eq!(controller.interaction(), Interaction::Idle);
	assert!(!controller.begin_drag(0));
}
