use thiserror::Error;

/// Failures reported by a [`SearchProvider`](crate::SearchProvider).
///
/// The select controller never surfaces these to its list: a failed search
/// leaves the previously cached candidates authoritative.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
	/// The provider ran but rejected the query.
	#[error("search provider failed: {message}")]
	Provider { message: String },
}

impl SearchError {
	/// Build a [`SearchError::Provider`] from any displayable message.
	pub fn provider(message: impl Into<String>) -> Self {
		Self::Provider {
			message: message.into(),
		}
	}
}
