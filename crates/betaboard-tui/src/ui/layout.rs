//! Main layout for the dashboard

use ratatui::prelude::*;

use super::footer::draw_footer;
use super::header::draw_header;
use super::panels;
use crate::app::App;

/// Draw the whole UI: header, form column, chart, footer.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Header
            Constraint::Min(12),    // Content
            Constraint::Length(2),  // Footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_content(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);
}

fn draw_content(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(40), // Form and results
            Constraint::Min(30),    // Chart
        ])
        .split(area);

    draw_form_column(frame, columns[0], app);
    panels::draw_chart_panel(frame, columns[1], app);
}

fn draw_form_column(frame: &mut Frame, area: Rect, app: &App) {
    // size the lower boxes to their content, the slot list takes the rest
    let beta_lines = app
        .outcome
        .as_ref()
        .map_or(0, |o| o.beta_lines().len());
    let messages = app.outcome.as_ref().map_or(0, |o| o.messages.len());

    let results_height = (beta_lines.max(1) + 2).min(8) as u16;
    let messages_height = (messages.max(1) + 2).min(7) as u16;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Period selector
            Constraint::Min(4),    // Ticker slots
            Constraint::Length(results_height),
            Constraint::Length(messages_height),
        ])
        .split(area);

    panels::draw_period(frame, rows[0], app);
    panels::draw_slots(frame, rows[1], app);
    panels::draw_results(frame, rows[2], app);
    panels::draw_messages(frame, rows[3], app);
}
