//! Session state for the dashboard

use betaboard_core::TimePeriod;
use betaboard_data::PriceFetcher;

use crate::engine::{self, RunOutcome};

/// Which part of the form has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Period,
    #[default]
    Slots,
}

/// Main application state.
///
/// Everything here is session scoped. A run replaces the previous outcome
/// wholesale; nothing survives a recompute except the form inputs.
pub struct App {
    /// Selected lookback period, applied to every fetch in a run
    pub period: TimePeriod,
    /// Ticker input slots, always ending in exactly one blank slot
    pub slots: Vec<String>,
    /// Index of the slot being edited
    pub cursor: usize,
    /// Current keyboard focus
    pub focus: Focus,
    /// Results of the last run, if any
    pub outcome: Option<RunOutcome>,
    /// Whether a run is in flight
    pub loading: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    recompute_requested: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            period: TimePeriod::default(),
            slots: vec![String::new()],
            cursor: 0,
            focus: Focus::Slots,
            outcome: None,
            loading: false,
            should_quit: false,
            recompute_requested: false,
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-apply the slot rule after the user leaves a slot: entries stop at
    /// the first blank, and exactly one trailing blank slot is kept open.
    pub fn normalize_slots(&mut self) {
        self.slots = next_slots(&self.slots);
        if self.cursor >= self.slots.len() {
            self.cursor = self.slots.len() - 1;
        }
    }

    /// Tickers collected for a run: everything before the first blank slot.
    pub fn collected_tickers(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|s| s.trim().to_uppercase())
            .take_while(|s| !s.is_empty())
            .collect()
    }

    /// The slot under the cursor
    pub fn current_slot(&self) -> &str {
        &self.slots[self.cursor]
    }

    /// Mutable access to the slot under the cursor
    pub fn current_slot_mut(&mut self) -> &mut String {
        &mut self.slots[self.cursor]
    }

    /// Move the cursor to the next slot, opening a new blank one if needed.
    pub fn advance_cursor(&mut self) {
        self.normalize_slots();
        if self.cursor + 1 < self.slots.len() {
            self.cursor += 1;
        }
    }

    /// Move the cursor to the previous slot.
    pub fn retreat_cursor(&mut self) {
        self.normalize_slots();
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn request_recompute(&mut self) {
        self.recompute_requested = true;
    }

    pub fn take_recompute_request(&mut self) -> bool {
        std::mem::take(&mut self.recompute_requested)
    }

    /// Run the engine over the collected tickers, blocking until done.
    pub fn recompute(&mut self, runtime: &tokio::runtime::Runtime, fetcher: &impl PriceFetcher) {
        self.normalize_slots();
        let tickers = self.collected_tickers();
        tracing::info!(period = %self.period, count = tickers.len(), "starting run");

        let outcome = runtime.block_on(engine::run(fetcher, self.period, &tickers));
        self.outcome = Some(outcome);
    }
}

/// The slot rule as a pure function: keep entries up to the first blank,
/// then exactly one open blank slot.
pub fn next_slots(slots: &[String]) -> Vec<String> {
    let mut next: Vec<String> = slots
        .iter()
        .map(|s| s.trim().to_string())
        .take_while(|s| !s.is_empty())
        .collect();
    next.push(String::new());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(entries: &[&str]) -> Vec<String> {
        entries.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_next_slots_appends_single_blank() {
        assert_eq!(next_slots(&slots(&["AAPL"])), slots(&["AAPL", ""]));
        assert_eq!(
            next_slots(&slots(&["AAPL", "MSFT", ""])),
            slots(&["AAPL", "MSFT", ""])
        );
    }

    #[test]
    fn test_next_slots_empty_input_is_one_blank() {
        assert_eq!(next_slots(&[]), slots(&[""]));
        assert_eq!(next_slots(&slots(&[""])), slots(&[""]));
    }

    #[test]
    fn test_next_slots_stops_at_first_blank() {
        // clearing a middle slot drops everything after it
        assert_eq!(
            next_slots(&slots(&["AAPL", "", "MSFT"])),
            slots(&["AAPL", ""])
        );
    }

    #[test]
    fn test_next_slots_trims_whitespace_only_entries() {
        assert_eq!(next_slots(&slots(&["  ", "AAPL"])), slots(&[""]));
    }

    #[test]
    fn test_collected_tickers_uppercases_and_stops_at_blank() {
        let mut app = App::new();
        app.slots = slots(&["aapl", " msft ", "", "GOOG"]);
        assert_eq!(app.collected_tickers(), slots(&["AAPL", "MSFT"]));
    }

    #[test]
    fn test_advance_cursor_opens_new_slot() {
        let mut app = App::new();
        app.current_slot_mut().push_str("AAPL");
        app.advance_cursor();

        assert_eq!(app.slots, slots(&["AAPL", ""]));
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_advance_cursor_on_blank_slot_stays_put() {
        let mut app = App::new();
        app.advance_cursor();

        assert_eq!(app.slots, slots(&[""]));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_recompute_request_is_taken_once() {
        let mut app = App::new();
        assert!(!app.take_recompute_request());
        app.request_recompute();
        assert!(app.take_recompute_request());
        assert!(!app.take_recompute_request());
    }

    #[test]
    fn test_recompute_runs_collected_tickers_through_the_engine() {
        use betaboard_core::PriceSeries;
        use betaboard_data::MockPriceFetcher;
        use chrono::NaiveDate;

        let mut mock = MockPriceFetcher::new();
        mock.expect_fetch().times(2).returning(|_, _| {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            Ok(PriceSeries::from_pairs((0..4).map(|i| {
                (start + chrono::Days::new(i), 100.0 + i as f64)
            })))
        });

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        let mut app = App::new();
        app.slots = slots(&["aapl", ""]);
        app.recompute(&runtime, &mock);

        let outcome = app.outcome.as_ref().unwrap();
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.reports[0].ticker, "AAPL");
        assert!(outcome.has_chart());
    }
}
