use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use indexmap::IndexMap;

use super::config::SelectConfig;
use super::matcher::{FilterHooks, SearchExpression, filter_compiled};
use super::normalize::normalize_query;
use super::runtime::{SearchProvider, SearchResponse, SearchRuntime};
use super::snapshot::SelectSnapshot;
use crate::timing::Debouncer;
use crate::types::{Direction, OptionKey, SelectOption, Slot};

/// Change to the selection produced by a controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent {
	/// The option was added to (multi) or became (single) the selection.
	Selected(SelectOption),
	/// The option was removed from the selection.
	Removed(SelectOption),
}

/// Navigation keys understood by [`SelectController::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKey {
	/// Move the highlight backward, opening the list.
	Up,
	/// Move the highlight forward, opening the list.
	Down,
	/// Select the highlighted option.
	Enter,
	/// Close the list.
	Escape,
	/// Remove the last selection when the query is empty (multi mode).
	Backspace,
	/// Leave the control, closing the list.
	Tab,
}

/// State machine behind a filterable single or multi select control.
///
/// The controller caches a candidate set, filters it synchronously on every
/// query change, and optionally asks a [`SearchProvider`] for a fresh
/// candidate set through a debounced background search. Only the response to
/// the most recently issued query is ever applied.
#[derive(Debug)]
pub struct SelectController {
	config: SelectConfig,
	hooks: FilterHooks,
	candidates: Vec<SelectOption>,
	query: String,
	normalized_query: String,
	expression: SearchExpression,
	filtered: Vec<SelectOption>,
	selected: IndexMap<OptionKey, SelectOption>,
	highlighted: Option<usize>,
	is_open: bool,
	pending_search: Debouncer<String>,
	search: Option<SearchRuntime>,
}

impl SelectController {
	/// Create a controller over a fixed candidate set.
	#[must_use]
	pub fn new(options: Vec<SelectOption>, config: SelectConfig) -> Self {
		let pending_search = Debouncer::new(config.search_debounce());
		let mut controller = Self {
			config,
			hooks: FilterHooks::default(),
			candidates: options,
			query: String::new(),
			normalized_query: String::new(),
			expression: SearchExpression::compile("", &FilterHooks::default()),
			filtered: Vec::new(),
			selected: IndexMap::new(),
			highlighted: None,
			is_open: false,
			pending_search,
			search: None,
		};
		controller.refilter();
		controller
	}

	/// Install filtering hooks and refilter with them.
	#[must_use]
	pub fn with_hooks(mut self, hooks: FilterHooks) -> Self {
		self.hooks = hooks;
		self.expression = SearchExpression::compile(&self.normalized_query, &self.hooks);
		self.refilter();
		self
	}

	/// Attach an external search provider run on a background worker.
	#[must_use]
	pub fn with_provider(self, provider: impl SearchProvider + 'static) -> Self {
		self.with_shared_provider(Arc::new(provider))
	}

	/// Attach an already shared search provider.
	#[must_use]
	pub fn with_shared_provider(mut self, provider: Arc<dyn SearchProvider>) -> Self {
		self.search = Some(SearchRuntime::spawn(provider));
		self
	}

	#[cfg(test)]
	pub(crate) fn with_runtime(mut self, runtime: SearchRuntime) -> Self {
		self.search = Some(runtime);
		self
	}

	/// Seed the selection, e.g. from a persisted value. Events are not emitted.
	#[must_use]
	pub fn with_selected(mut self, selected: impl IntoIterator<Item = SelectOption>) -> Self {
		for option in selected {
			if !self.config.multiple {
				self.selected.clear();
			}
			self.selected.insert(option.key.clone(), option);
		}
		self.refilter();
		self
	}

	/// Active configuration.
	#[must_use]
	pub fn config(&self) -> &SelectConfig {
		&self.config
	}

	/// Candidate set currently cached by the controller.
	#[must_use]
	pub fn candidates(&self) -> &[SelectOption] {
		&self.candidates
	}

	/// Replace the cached candidates and refilter against the current query.
	pub fn set_candidates(&mut self, options: Vec<SelectOption>) {
		self.candidates = options;
		self.refilter();
	}

	/// Query text exactly as last supplied.
	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Query after trimming and normalization.
	#[must_use]
	pub fn normalized_query(&self) -> &str {
		&self.normalized_query
	}

	/// Options matching the current query.
	#[must_use]
	pub fn filtered(&self) -> &[SelectOption] {
		&self.filtered
	}

	/// Current selection in insertion order.
	#[must_use]
	pub fn selected(&self) -> &IndexMap<OptionKey, SelectOption> {
		&self.selected
	}

	/// Whether an option with this key is selected.
	#[must_use]
	pub fn is_selected(&self, key: &OptionKey) -> bool {
		self.selected.contains_key(key)
	}

	/// Index into [`filtered`](Self::filtered) of the highlighted option.
	#[must_use]
	pub fn highlighted(&self) -> Option<usize> {
		self.highlighted
	}

	/// The highlighted option, if any.
	#[must_use]
	pub fn highlighted_option(&self) -> Option<&SelectOption> {
		self.highlighted.and_then(|index| self.filtered.get(index))
	}

	/// Whether the option list is showing.
	#[must_use]
	pub fn is_open(&self) -> bool {
		self.is_open
	}

	/// Whether a search is waiting on its debounce or on the provider.
	#[must_use]
	pub fn is_searching(&self) -> bool {
		self.pending_search.is_pending()
			|| self.search.as_ref().is_some_and(SearchRuntime::is_in_flight)
	}

	/// Show the option list.
	pub fn open(&mut self) {
		self.is_open = true;
		self.apply_auto_highlight();
	}

	/// Hide the option list and drop the highlight.
	pub fn close(&mut self) {
		self.is_open = false;
		self.highlighted = None;
	}

	/// Update the query, refilter the cached candidates immediately, and
	/// schedule the external search.
	pub fn set_query(&mut self, text: impl Into<String>, now: Instant) {
		self.query = text.into();
		self.normalized_query = normalize_query(&self.query, self.config.ignore_diacritics);
		self.expression = SearchExpression::compile(&self.normalized_query, &self.hooks);
		self.is_open = true;
		self.refilter();

		if self.search.is_some() {
			self.pending_search.schedule(self.normalized_query.clone(), now);
			self.issue_due_search(now);
		}
	}

	/// Advance time: issue a search whose debounce elapsed and apply any
	/// responses that arrived. Returns whether visible state changed.
	pub fn tick(&mut self, now: Instant) -> bool {
		self.issue_due_search(now);
		self.pump_search_results()
	}

	/// Drain the worker channel, applying only the latest query's response.
	/// Returns whether the candidate set changed.
	pub fn pump_search_results(&mut self) -> bool {
		let mut changed = false;
		loop {
			let Some(runtime) = self.search.as_ref() else {
				break;
			};
			match runtime.try_recv() {
				Ok(response) => changed |= self.handle_search_response(response),
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					tracing::debug!("search worker disconnected");
					if let Some(runtime) = self.search.as_mut() {
						runtime.mark_idle();
					}
					break;
				}
			}
		}
		changed
	}

	fn handle_search_response(&mut self, response: SearchResponse) -> bool {
		let Some(runtime) = self.search.as_mut() else {
			return false;
		};
		if !runtime.matches_latest(response.id) {
			tracing::debug!(id = response.id, query = %response.query, "discarding stale search response");
			return false;
		}
		runtime.record_completion(response.id);

		match response.outcome {
			Ok(options) => {
				tracing::debug!(
					id = response.id,
					query = %response.query,
					count = options.len(),
					"applying search response"
				);
				self.candidates = options;
				self.refilter();
				true
			}
			Err(err) => {
				tracing::debug!(id = response.id, %err, "search rejected; keeping cached candidates");
				false
			}
		}
	}

	fn issue_due_search(&mut self, now: Instant) {
		let Some(query) = self.pending_search.poll(now) else {
			return;
		};
		if let Some(runtime) = self.search.as_mut() {
			let id = runtime.issue_search(query, self.candidates.clone());
			tracing::trace!(id, "issued search");
		}
	}

	/// Add `option` to the selection (multi) or make it the selection
	/// (single). Returns `None` when nothing changed.
	pub fn select_option(&mut self, option: SelectOption) -> Option<SelectEvent> {
		if option.disabled {
			return None;
		}

		if self.config.multiple {
			if self.selected.contains_key(&option.key) {
				return None;
			}
		} else {
			if self.selected.len() == 1 && self.selected.contains_key(&option.key) {
				self.close();
				return None;
			}
			self.selected.clear();
		}

		self.selected.insert(option.key.clone(), option.clone());
		if !self.config.multiple {
			self.close();
		}
		self.refilter();
		Some(SelectEvent::Selected(option))
	}

	/// Remove the option with `key` from the selection, keeping the order of
	/// the rest.
	pub fn remove_option(&mut self, key: &OptionKey) -> Option<SelectEvent> {
		let removed = self.selected.shift_remove(key)?;
		self.refilter();
		Some(SelectEvent::Removed(removed))
	}

	/// Move the highlight one step through the filtered list, wrapping at
	/// either end. The selection is untouched.
	pub fn move_highlight(&mut self, direction: Direction) -> Option<usize> {
		let len = self.filtered.len();
		self.highlighted = match self.highlighted {
			_ if len == 0 => None,
			Some(index) => direction.step_wrapping(index, len),
			None => match direction {
				Direction::Forward => Some(0),
				Direction::Backward => Some(len - 1),
			},
		};
		self.highlighted
	}

	/// Select the highlighted option.
	pub fn commit_highlighted(&mut self) -> Option<SelectEvent> {
		let option = self.highlighted_option()?.clone();
		self.select_option(option)
	}

	/// Apply a navigation key.
	pub fn handle_key(&mut self, key: SelectKey) -> Option<SelectEvent> {
		match key {
			SelectKey::Up | SelectKey::Down => {
				let direction = if key == SelectKey::Up {
					Direction::Backward
				} else {
					Direction::Forward
				};
				if self.is_open {
					self.move_highlight(direction);
				} else {
					self.is_open = true;
					if self.highlighted.is_none() {
						self.move_highlight(direction);
					}
				}
				None
			}
			SelectKey::Enter if self.is_open => self.commit_highlighted(),
			SelectKey::Enter => None,
			SelectKey::Escape | SelectKey::Tab => {
				self.close();
				None
			}
			SelectKey::Backspace => {
				if !self.config.multiple || !self.query.is_empty() {
					return None;
				}
				let key = self.selected.last().map(|(key, _)| key.clone())?;
				self.remove_option(&key)
			}
		}
	}

	/// Live-region text describing the open list, if any.
	#[must_use]
	pub fn announcement(&self) -> Option<String> {
		if !self.is_open {
			return None;
		}
		match self.filtered.len() {
			0 if self.normalized_query.is_empty() => None,
			0 => Some("No results.".to_string()),
			1 => Some("1 result found, use up and down arrow keys to navigate.".to_string()),
			count => Some(format!(
				"{count} results found, use up and down arrow keys to navigate."
			)),
		}
	}

	/// Borrowed view of the current state.
	#[must_use]
	pub fn snapshot(&self) -> SelectSnapshot<'_> {
		SelectSnapshot {
			query: &self.query,
			expression: &self.expression,
			ignore_diacritics: self.config.ignore_diacritics,
			filtered: &self.filtered,
			highlighted: self.highlighted,
			selected: &self.selected,
			is_open: self.is_open,
			is_searching: self.is_searching(),
			multiple: self.config.multiple,
			announcement: self.announcement(),
		}
	}

	/// Hand the current snapshot to a render slot.
	pub fn render<'s, S>(&'s self, slot: &mut S) -> S::Output
	where
		S: Slot<SelectSnapshot<'s>>,
	{
		slot.fill(&self.snapshot())
	}

	fn refilter(&mut self) {
		self.filtered = filter_compiled(
			&self.candidates,
			&self.normalized_query,
			&self.expression,
			&self.selected,
			&self.config,
			&self.hooks,
		);
		self.clamp_highlight();
	}

	fn clamp_highlight(&mut self) {
		let len = self.filtered.len();
		self.highlighted = match self.highlighted {
			_ if len == 0 => None,
			Some(index) => Some(index.min(len - 1)),
			None => None,
		};
		self.apply_auto_highlight();
	}

	fn apply_auto_highlight(&mut self) {
		if self.config.auto_highlight
			&& self.is_open
			&& self.highlighted.is_none()
			&& !self.filtered.is_empty()
		{
			self.highlighted = Some(0);
		}
	}
}
