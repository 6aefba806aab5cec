//! Keyboard handling for the dashboard

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::app::{App, Focus};

/// Handle one keyboard event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Global shortcuts (work in both focus states)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.request_recompute();
            return;
        }
        KeyCode::F(5) => {
            app.request_recompute();
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::Period => Focus::Slots,
                Focus::Slots => Focus::Period,
            };
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Period => handle_period_keys(app, key),
        Focus::Slots => handle_slot_keys(app, key),
    }
}

fn handle_period_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        // 'q' only quits while not typing into a slot
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Left | KeyCode::Up => app.period = app.period.previous(),
        KeyCode::Right | KeyCode::Down => app.period = app.period.next(),
        KeyCode::Enter => app.focus = Focus::Slots,
        _ => {}
    }
}

fn handle_slot_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if is_ticker_char(c) => {
            app.current_slot_mut().push(c.to_ascii_uppercase());
        }
        KeyCode::Backspace => {
            app.current_slot_mut().pop();
        }
        KeyCode::Up => app.retreat_cursor(),
        KeyCode::Down => app.advance_cursor(),
        KeyCode::Enter => {
            // a filled slot opens the next one; leaving the trailing slot
            // blank ends collection and starts the run
            if app.current_slot().trim().is_empty() {
                app.request_recompute();
            } else {
                app.advance_cursor();
            }
        }
        _ => {}
    }
}

fn is_ticker_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')
}

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
