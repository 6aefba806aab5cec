//! Form, result and chart panels

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, Focus};
use crate::engine::NO_VALID_TICKERS;
use crate::widgets::ChartData;

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Period selector, one value cycled with the arrow keys.
pub fn draw_period(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Period;
    let text = format!("◀ {} ▶", app.period.label());

    let selector = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(focus_style(focused))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Time Period ")
                .border_style(focus_style(focused)),
        );

    frame.render_widget(selector, area);
}

/// The growable ticker slot column, one line per slot.
pub fn draw_slots(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Slots;

    let items: Vec<ListItem> = app
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let active = focused && i == app.cursor;
            let text = if active {
                format!("▸ {slot}_")
            } else if slot.is_empty() {
                "  Enter Ticker (e.g. 'AAPL')".to_string()
            } else {
                format!("  {slot}")
            };
            let style = if active {
                Style::default().fg(Color::Yellow)
            } else if slot.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Tickers ")
            .border_style(focus_style(focused)),
    );

    frame.render_widget(list, area);
}

/// Beta lines for the last run.
pub fn draw_results(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<ListItem> = match &app.outcome {
        Some(outcome) => {
            let beta_lines = outcome.beta_lines();
            if beta_lines.is_empty() {
                vec![ListItem::new("--").style(Style::default().fg(Color::DarkGray))]
            } else {
                beta_lines
                    .into_iter()
                    .map(|l| ListItem::new(l).style(Style::default().fg(Color::Green)))
                    .collect()
            }
        }
        None => vec![ListItem::new("--").style(Style::default().fg(Color::DarkGray))],
    };

    let list = List::new(lines).block(Block::default().borders(Borders::ALL).title(" Results "));
    frame.render_widget(list, area);
}

/// Per-ticker error lines from the last run.
pub fn draw_messages(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<ListItem> = match &app.outcome {
        Some(outcome) if !outcome.messages.is_empty() => outcome
            .messages
            .iter()
            .map(|m| ListItem::new(m.as_str()).style(Style::default().fg(Color::Red)))
            .collect(),
        _ => vec![ListItem::new("--").style(Style::default().fg(Color::DarkGray))],
    };

    let list = List::new(lines).block(Block::default().borders(Borders::ALL).title(" Messages "));
    frame.render_widget(list, area);
}

/// The multi-series price chart, or whichever placeholder applies.
pub fn draw_chart_panel(frame: &mut Frame, area: Rect, app: &App) {
    if app.loading {
        draw_placeholder(frame, area, "Fetching price history...");
        return;
    }

    match &app.outcome {
        Some(outcome) if outcome.has_chart() => {
            match ChartData::from_series(&outcome.chart_series) {
                Some(data) => frame.render_widget(data.chart(), area),
                None => draw_placeholder(frame, area, NO_VALID_TICKERS),
            }
        }
        Some(_) => draw_placeholder(frame, area, NO_VALID_TICKERS),
        None => draw_placeholder(frame, area, "Enter tickers and press Enter to fetch"),
    }
}

fn draw_placeholder(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Historical Adjusted Close Prices ")
        .style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let centered = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(inner);

    let msg = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(msg, centered[1]);
}
