//! Terminal front end for the `listkit` controllers.
//!
//! Widgets render controller snapshots with ratatui, and [`run_app`] owns the
//! terminal while a [`Picker`] or [`Sorter`] session is active.

mod app;
pub mod components;
pub mod input;
mod runtime;
pub mod style;


pub use app::{PickOutcome, Picker, SortOutcome, Sorter};
pub use input::QueryInput;
pub use runtime::{Interactive, run_app};
pub use style::{Theme, builtin_themes, default_theme};
