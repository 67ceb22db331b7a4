use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Trim the query and optionally fold diacritics.
#[must_use]
pub fn normalize_query(text: &str, ignore_diacritics: bool) -> String {
	normalize_text(text.trim(), ignore_diacritics).into_owned()
}

/// Fold diacritics out of `text` when requested, borrowing otherwise.
#[must_use]
pub fn normalize_text(text: &str, ignore_diacritics: bool) -> Cow<'_, str> {
	if ignore_diacritics && !text.is_ascii() {
		Cow::Owned(strip_diacritics(text))
	} else {
		Cow::Borrowed(text)
	}
}

/// Decompose `text` and drop combining marks, so `"Crème brûlée"` becomes
/// `"Creme brulee"`.
#[must_use]
pub fn strip_diacritics(text: &str) -> String {
	text.nfd().filter(|ch| !is_combining_mark(*ch)).collect()
}
