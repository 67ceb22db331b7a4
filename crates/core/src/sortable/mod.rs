//! Reorderable list controller.
//!
//! A pointer drag tracks a drag source and a drop position computed with a
//! before/after midpoint test on the hovered item; the keyboard path walks an
//! explicit `Idle → Selecting → Grabbed` machine. Keyboard moves wrap around
//! the ends of the list.

mod config;
mod controller;
mod geometry;
mod interaction;
mod snapshot;

#[cfg(test)]
mod tests;

pub use config::SortableConfig;
pub use controller::{SortableController, drop_position};
pub use geometry::{Bounds, Orientation, Point};
pub use interaction::{Interaction, SortKey, SortableItem};
pub use snapshot::{ItemRole, SortableSnapshot};
