//! Headless controllers behind the `listkit` widgets.
//!
//! The crate owns no terminal or rendering state. Each controller exposes
//! its current state as a borrowed snapshot that callers turn into markup
//! through a [`Slot`], keeping state computation separate from presentation.
//!
//! - [`select`] filters a candidate set as the user types, reconciles an
//!   asynchronous search provider with last-query-wins sequencing, and tracks
//!   single or multiple selections.
//! - [`sortable`] reorders a list through pointer drags or a keyboard
//!   grab/move/drop state machine.

pub mod error;
pub mod select;
pub mod sortable;
pub mod timing;
pub mod types;

pub use error::SearchError;
pub use select::{
	SearchProvider, SelectConfig, SelectController, SelectEvent, SelectKey, SelectSnapshot,
};
pub use sortable::{
	Bounds, Interaction, Orientation, Point, SortKey, SortableConfig, SortableController,
	SortableItem, SortableSnapshot,
};
pub use timing::{Debouncer, Throttle};
pub use types::{Direction, OptionKey, SelectOption, Slot};
