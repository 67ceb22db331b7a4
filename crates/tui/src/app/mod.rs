//! Full-screen applications built on the controllers.
//!
//! [`Picker`] drives a [`SelectController`](listkit_core::SelectController)
//! from a query input, and [`Sorter`] drives a
//! [`SortableController`](listkit_core::SortableController) from the keyboard
//! and mouse. Both implement [`Interactive`](crate::Interactive) so they can
//! be handed to [`run_app`](crate::run_app).

mod picker;
mod sorter;

pub use picker::{PickOutcome, Picker};
pub use sorter::{SortOutcome, Sorter};
