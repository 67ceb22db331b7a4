//! Background search worker and last-query-wins sequencing.
//!
//! Every issued query gets a fresh id. The worker skips queries that were
//! superseded before it reached them, and the controller drops any response
//! whose id is not the most recent one, so only the newest query can update
//! the cached candidates.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::error::SearchError;
use crate::types::SelectOption;

/// External collaborator that refreshes the candidate set for a query.
///
/// Runs on the worker thread. `previous` is the candidate set cached at the
/// time the query was issued.
pub trait SearchProvider: Send + Sync {
	/// Produce the candidates for `query`.
	fn search(&self, previous: &[SelectOption], query: &str)
	-> Result<Vec<SelectOption>, SearchError>;
}

impl<F> SearchProvider for F
where
	F: Fn(&[SelectOption], &str) -> Result<Vec<SelectOption>, SearchError> + Send + Sync,
{
	fn search(
		&self,
		previous: &[SelectOption],
		query: &str,
	) -> Result<Vec<SelectOption>, SearchError> {
		self(previous, query)
	}
}

/// Commands understood by the background search worker.
#[derive(Debug)]
pub enum SearchCommand {
	/// Run the provider for the given query.
	Query {
		/// Identifier that correlates the response with its query.
		id: u64,
		/// Normalized query text.
		query: String,
		/// Candidates cached when the query was issued.
		previous: Vec<SelectOption>,
	},
	/// Stop the background worker thread.
	Shutdown,
}

/// Provider answer tagged with the id of the query that produced it.
#[derive(Debug, Clone)]
pub struct SearchResponse {
	/// Identifier of the originating query.
	pub id: u64,
	/// Query text the provider answered.
	pub query: String,
	/// New candidates, or the provider's failure.
	pub outcome: Result<Vec<SelectOption>, SearchError>,
}

/// Launch the worker thread and return its communication channels.
pub fn spawn(
	provider: Arc<dyn SearchProvider>,
) -> (Sender<SearchCommand>, Receiver<SearchResponse>, Arc<AtomicU64>) {
	let (command_tx, command_rx) = mpsc::channel();
	let (response_tx, response_rx) = mpsc::channel();
	let latest_query_id = Arc::new(AtomicU64::new(0));
	let thread_latest = Arc::clone(&latest_query_id);

	thread::spawn(move || worker_loop(provider.as_ref(), command_rx, response_tx, thread_latest));

	(command_tx, response_rx, latest_query_id)
}

fn worker_loop(
	provider: &dyn SearchProvider,
	command_rx: Receiver<SearchCommand>,
	response_tx: Sender<SearchResponse>,
	latest_query_id: Arc<AtomicU64>,
) {
	while let Ok(command) = command_rx.recv() {
		match command {
			SearchCommand::Query {
				id,
				query,
				previous,
			} => {
				if latest_query_id.load(AtomicOrdering::Acquire) != id {
					tracing::trace!(id, "skipping superseded query");
					continue;
				}
				let outcome = provider.search(&previous, &query);
				if response_tx
					.send(SearchResponse { id, query, outcome })
					.is_err()
				{
					break;
				}
			}
			SearchCommand::Shutdown => break,
		}
	}
}

/// Controller-side handle on the search worker.
#[derive(Debug)]
pub(crate) struct SearchRuntime {
	tx: Sender<SearchCommand>,
	rx: Receiver<SearchResponse>,
	latest_query_id: Arc<AtomicU64>,
	next_query_id: u64,
	current_query_id: Option<u64>,
	in_flight: bool,
}

impl SearchRuntime {
	pub(crate) fn new(
		tx: Sender<SearchCommand>,
		rx: Receiver<SearchResponse>,
		latest_query_id: Arc<AtomicU64>,
	) -> Self {
		Self {
			tx,
			rx,
			latest_query_id,
			next_query_id: 0,
			current_query_id: None,
			in_flight: false,
		}
	}

	pub(crate) fn spawn(provider: Arc<dyn SearchProvider>) -> Self {
		let (tx, rx, latest) = spawn(provider);
		Self::new(tx, rx, latest)
	}

	/// Send a query to the worker, superseding any earlier one.
	pub(crate) fn issue_search(&mut self, query: String, previous: Vec<SelectOption>) -> u64 {
		self.next_query_id = self.next_query_id.saturating_add(1);
		let id = self.next_query_id;
		self.current_query_id = Some(id);
		self.latest_query_id.store(id, AtomicOrdering::Release);
		self.in_flight = self
			.tx
			.send(SearchCommand::Query {
				id,
				query,
				previous,
			})
			.is_ok();
		id
	}

	pub(crate) fn matches_latest(&self, id: u64) -> bool {
		Some(id) == self.current_query_id
	}

	pub(crate) fn record_completion(&mut self, id: u64) {
		if self.matches_latest(id) {
			self.in_flight = false;
		}
	}

	pub(crate) fn mark_idle(&mut self) {
		self.in_flight = false;
	}

	pub(crate) fn is_in_flight(&self) -> bool {
		self.in_flight
	}

	pub(crate) fn try_recv(&self) -> Result<SearchResponse, TryRecvError> {
		self.rx.try_recv()
	}

	pub(crate) fn shutdown(&self) {
		let _ = self.tx.send(SearchCommand::Shutdown);
	}
}

impl Drop for SearchRuntime {
	fn drop(&mut self) {
		self.shutdown();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_the_latest_id_matches() {
		let (command_tx, _command_rx) = mpsc::channel::<SearchCommand>();
		let (_response_tx, response_rx) = mpsc::channel();
		let latest = Arc::new(AtomicU64::new(0));
		let mut runtime = SearchRuntime::new(command_tx, response_rx, Arc::clone(&latest));

		let first = runtime.issue_search("a".into(), Vec::new());
		let second = runtime.issue_search("ab".into(), Vec::new());

		assert!(!runtime.matches_latest(first));
		assert!(runtime.matches_latest(second));
		assert_eq!(latest.load(AtomicOrdering::Acquire), second);
		assert!(runtime.is_in_flight());

		runtime.record_completion(first);
		assert!(runtime.is_in_flight(), "stale completions keep the query in flight");
		runtime.record_completion(second);
		assert!(!runtime.is_in_flight());
	}

	#[test]
	fn disconnected_worker_is_not_in_flight() {
		let (command_tx, command_rx) = mpsc::channel::<SearchCommand>();
		drop(command_rx);
		let (_response_tx, response_rx) = mpsc::channel();
		let mut runtime =
			SearchRuntime::new(command_tx, response_rx, Arc::new(AtomicU64::new(0)));

		runtime.issue_search("a".into(), Vec::new());
		assert!(!runtime.is_in_flight());
	}
}
