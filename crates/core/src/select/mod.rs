//! Filterable single/multi select controller.
//!
//! Typing refilters the cached candidates synchronously, then a debounced
//! search is handed to an optional [`SearchProvider`] on a background worker.
//! Responses are sequenced so that only the newest query can replace the
//! cached candidates; a failed search leaves them untouched.

mod config;
mod controller;
pub mod matcher;
pub mod normalize;
pub mod runtime;
mod snapshot;


pub use config::SelectConfig;
pub use controller::{SelectController, SelectEvent, SelectKey};
pub use matcher::{FilterHooks, SearchExpression, filter_options};
pub use runtime::{SearchProvider, SearchResponse};
pub use snapshot::SelectSnapshot;
