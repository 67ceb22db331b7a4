//! Terminal event loop shared by the interactive widgets.

use std::collections::VecDeque;
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use ratatui::Frame;
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use ratatui::crossterm::execute;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A full-screen widget that [`run_app`] can drive.
pub trait Interactive {
	/// Value returned when the session ends.
	type Outcome;

	/// React to a terminal event. Returning an outcome ends the session.
	fn handle_event(&mut self, event: Event, now: Instant) -> Result<Option<Self::Outcome>>;

	/// Advance timers once per frame.
	fn tick(&mut self, now: Instant);

	fn draw(&mut self, frame: &mut Frame);
}

/// Take over the terminal and pump events into `app` until it finishes.
///
/// Input is read on a separate thread so that debounce deadlines and search
/// responses keep being serviced while the user is idle.
pub fn run_app<A: Interactive>(app: &mut A) -> Result<A::Outcome> {
	let mut terminal = ratatui::init();
	terminal.clear()?;
	execute!(stdout(), EnableMouseCapture)?;

	let (event_tx, event_rx) = mpsc::channel();
	let event_loop_running = Arc::new(AtomicBool::new(true));
	let event_loop_flag = Arc::clone(&event_loop_running);

	let event_thread = thread::spawn(move || -> Result<()> {
		while event_loop_flag.load(Ordering::Relaxed) {
			if event::poll(EVENT_POLL_INTERVAL)? {
				let event = event::read()?;
				if event_tx.send(event).is_err() {
					break;
				}
			}
		}
		Ok(())
	});

	let mut pending_events = VecDeque::new();

	let result: Result<A::Outcome> = 'event_loop: loop {
		loop {
			match event_rx.try_recv() {
				Ok(event) => pending_events.push_back(event),
				Err(mpsc::TryRecvError::Empty) => break,
				Err(mpsc::TryRecvError::Disconnected) => {
					break 'event_loop Err(anyhow!("input event channel disconnected"));
				}
			}
		}

		let now = Instant::now();
		let mut maybe_outcome = None;
		while let Some(event) = pending_events.pop_front() {
			match app.handle_event(event, now) {
				Ok(Some(outcome)) => {
					maybe_outcome = Some(outcome);
					break;
				}
				Ok(None) => {}
				Err(err) => break 'event_loop Err(err),
			}
		}

		if let Some(outcome) = maybe_outcome {
			break Ok(outcome);
		}

		app.tick(Instant::now());

		if let Err(err) = terminal.draw(|frame| app.draw(frame)) {
			break Err(err.into());
		}

		thread::sleep(FRAME_INTERVAL);
	};

	ratatui::restore();
	execute!(stdout(), DisableMouseCapture)?;

	event_loop_running.store(false, Ordering::Relaxed);
	match event_thread.join() {
		Ok(join_result) => join_result?,
		Err(err) => std::panic::resume_unwind(err),
	}

	result
}
