//! Time-based gates for input handlers.
//!
//! Both gates take the current [`Instant`] explicitly instead of reading the
//! clock, so callers drive them from their own event loop tick and tests can
//! step time deterministically.

use std::time::{Duration, Instant};

/// Trailing debounce: releases the most recent value once no new value has
/// been scheduled for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
	delay: Duration,
	pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
	/// Create a debouncer with the given quiet period.
	#[must_use]
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			pending: None,
		}
	}

	/// Quiet period required before a value is released.
	#[must_use]
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Replace any pending value and restart the quiet period.
	pub fn schedule(&mut self, value: T, now: Instant) {
		self.pending = Some((now + self.delay, value));
	}

	/// Release the pending value if its quiet period has elapsed.
	pub fn poll(&mut self, now: Instant) -> Option<T> {
		match &self.pending {
			Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, value)| value),
			_ => None,
		}
	}

	/// Release the pending value immediately.
	pub fn flush(&mut self) -> Option<T> {
		self.pending.take().map(|(_, value)| value)
	}

	/// Drop the pending value without releasing it.
	pub fn cancel(&mut self) {
		self.pending = None;
	}

	/// Whether a value is waiting for its quiet period to elapse.
	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Instant at which the pending value becomes releasable.
	#[must_use]
	pub fn deadline(&self) -> Option<Instant> {
		self.pending.as_ref().map(|(deadline, _)| *deadline)
	}
}

/// Rate limiter that releases at most one value per `interval`.
///
/// Values offered too soon are held back; only the latest held value is kept
/// and it is released by [`Throttle::poll`] once the interval has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
	interval: Duration,
	last_release: Option<Instant>,
	pending: Option<T>,
}

impl<T> Throttle<T> {
	/// Create a throttle with the given minimum spacing between releases.
	#[must_use]
	pub fn new(interval: Duration) -> Self {
		Self {
			interval,
			last_release: None,
			pending: None,
		}
	}

	/// Offer a value; returns it straight back when the gate is open.
	pub fn offer(&mut self, value: T, now: Instant) -> Option<T> {
		if self.is_open(now) {
			self.pending = None;
			self.last_release = Some(now);
			Some(value)
		} else {
			self.pending = Some(value);
			None
		}
	}

	/// Release the held value once the interval since the last release has
	/// elapsed.
	pub fn poll(&mut self, now: Instant) -> Option<T> {
		if self.pending.is_some() && self.is_open(now) {
			self.last_release = Some(now);
			self.pending.take()
		} else {
			None
		}
	}

	/// Release the held value regardless of timing.
	pub fn flush(&mut self) -> Option<T> {
		self.pending.take()
	}

	/// Forget any held value and the last release time.
	pub fn reset(&mut self) {
		self.pending = None;
		self.last_release = None;
	}

	/// Whether a value is being held back.
	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	fn is_open(&self, now: Instant) -> bool {
		self.last_release
			.is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debouncer_restarts_quiet_period_on_each_schedule() {
		let start = Instant::now();
		let mut debouncer = Debouncer::new(Duration::from_millis(100));

		debouncer.schedule("a", start);
		debouncer.schedule("ab", start + Duration::from_millis(80));

		assert_eq!(debouncer.poll(start + Duration::from_millis(120)), None);
		assert_eq!(debouncer.poll(start + Duration::from_millis(180)), Some("ab"));
		assert!(!debouncer.is_pending());
	}

	#[test]
	fn debouncer_flush_and_cancel_skip_the_quiet_period() {
		let start = Instant::now();
		let mut debouncer = Debouncer::new(Duration::from_millis(100));
		assert_eq!(debouncer.deadline(), None);

		debouncer.schedule("a", start);
		assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(100)));
		assert_eq!(debouncer.flush(), Some("a"));
		assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);

		debouncer.schedule("b", start);
		debouncer.cancel();
		assert!(!debouncer.is_pending());
		assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
	}

	#[test]
	fn zero_delay_releases_on_the_same_instant() {
		let now = Instant::now();
		let mut debouncer = Debouncer::new(Duration::ZERO);
		debouncer.schedule(1, now);
		assert_eq!(debouncer.poll(now), Some(1));
	}

	#[test]
	fn throttle_holds_latest_value_until_interval_elapses() {
		let start = Instant::now();
		let mut throttle = Throttle::new(Duration::from_millis(16));

		assert_eq!(throttle.offer(1, start), Some(1));
		assert_eq!(throttle.offer(2, start + Duration::from_millis(4)), None);
		assert_eq!(throttle.offer(3, start + Duration::from_millis(8)), None);
		assert_eq!(throttle.poll(start + Duration::from_millis(10)), None);
		assert_eq!(throttle.poll(start + Duration::from_millis(16)), Some(3));
		assert_eq!(throttle.poll(start + Duration::from_millis(40)), None);
	}

	#[test]
	fn throttle_flush_ignores_timing() {
		let start = Instant::now();
		let mut throttle = Throttle::new(Duration::from_millis(16));
		throttle.offer('a', start);
		throttle.offer('b', start);
		assert_eq!(throttle.flush(), Some('b'));
		assert_eq!(throttle.flush(), None);
	}
}
