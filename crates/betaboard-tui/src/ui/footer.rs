//! Footer bar widget with keyboard shortcuts

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Focus};

/// Draw the footer bar with context-sensitive help.
pub fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        Focus::Period => "[←→] Period  [Enter] Edit tickers  [Tab] Focus  [q] Quit",
        Focus::Slots => "Type a ticker  [Enter] Next slot / run  [↑↓] Slots  [Tab] Focus  [Esc] Quit",
    };

    let display_text = if app.loading {
        format!("Fetching... | {help_text}")
    } else {
        help_text.to_string()
    };

    let footer = Paragraph::new(display_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(footer, area);
}
