use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a [`SelectOption`].
///
/// Selections are keyed by this value, so two options with the same key are
/// the same option even when their labels differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionKey(String);

impl OptionKey {
	/// Create a key from any string-like value.
	pub fn new(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	/// Borrow the key as a string slice.
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for OptionKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for OptionKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for OptionKey {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for OptionKey {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// A candidate presented by the select controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOption")]
pub struct SelectOption {
	/// Stable identity used for selection bookkeeping.
	pub key: OptionKey,
	/// Text shown to the user and matched against the query.
	pub label: String,
	/// Extra terms that also match the query.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub keywords: Vec<String>,
	/// Disabled options never match a query and cannot be selected.
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub disabled: bool,
}

impl SelectOption {
	/// Create an option with an explicit key and label.
	pub fn new(key: impl Into<OptionKey>, label: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
			keywords: Vec::new(),
			disabled: false,
		}
	}

	/// Create an option whose key is its label.
	pub fn labelled(label: impl Into<String>) -> Self {
		let label = label.into();
		Self::new(label.clone(), label)
	}

	/// Attach additional keywords that participate in matching.
	#[must_use]
	pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.keywords.extend(keywords.into_iter().map(Into::into));
		self
	}

	/// Mark the option as disabled.
	#[must_use]
	pub fn disabled(mut self) -> Self {
		self.disabled = true;
		self
	}
}

/// Accepted wire shapes: a bare label string or a full object whose `key`
/// falls back to the label.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
	Label(String),
	Full {
		#[serde(default)]
		key: Option<String>,
		label: String,
		#[serde(default)]
		keywords: Vec<String>,
		#[serde(default)]
		disabled: bool,
	},
}

impl From<RawOption> for SelectOption {
	fn from(raw: RawOption) -> Self {
		match raw {
			RawOption::Label(label) => SelectOption::labelled(label),
			RawOption::Full {
				key,
				label,
				keywords,
				disabled,
			} => SelectOption {
				key: OptionKey::new(key.unwrap_or_else(|| label.clone())),
				label,
				keywords,
				disabled,
			},
		}
	}
}
