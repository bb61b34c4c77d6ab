use crate::app::MenuItem;
use cfb_api::client::{FetchError, FetchState};
use cfb_api::present::{GameCard, rank_by_watchability};

// ---------------------------------------------------------------------------
// Scoreboard state
// ---------------------------------------------------------------------------

/// One successful fetch, kept in both orders so toggling the sort is free.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slate {
    pub feed: Vec<GameCard>,
    pub ranked: Vec<GameCard>,
}

impl Slate {
    pub fn new(feed: Vec<GameCard>) -> Self {
        let mut ranked = feed.clone();
        rank_by_watchability(&mut ranked);
        Self { feed, ranked }
    }
}

#[derive(Debug)]
pub struct ScoreboardState {
    pub fetch: FetchState<Slate>,
    /// Sort by watchability instead of feed order.
    pub ranked: bool,
    pub selected: usize,
    /// Local time of the last successful fetch, "HH:MM:SS".
    pub fetched_at: Option<String>,
}

impl Default for ScoreboardState {
    fn default() -> Self {
        Self {
            fetch: FetchState::Loading,
            ranked: true,
            selected: 0,
            fetched_at: None,
        }
    }
}

impl ScoreboardState {
    /// Cards in the current sort order; empty unless the last fetch succeeded.
    pub fn cards(&self) -> &[GameCard] {
        match self.fetch.as_success() {
            Some(slate) if self.ranked => &slate.ranked,
            Some(slate) => &slate.feed,
            None => &[],
        }
    }

    pub fn selected_card(&self) -> Option<&GameCard> {
        self.cards().get(self.selected)
    }

    pub fn start_loading(&mut self) {
        self.fetch = FetchState::Loading;
    }

    /// Replace the slate, keeping the cursor on the same game when it is
    /// still on the board.
    pub fn load(&mut self, cards: Vec<GameCard>, fetched_at: String) {
        let previous = self.previous_event_id();
        self.fetch = FetchState::Success(Slate::new(cards));
        self.fetched_at = Some(fetched_at);
        self.reselect(previous.as_deref());
    }

    pub fn fail(&mut self, error: FetchError) {
        self.fetch = FetchState::Failure(error);
    }

    pub fn toggle_ranked(&mut self) {
        let current = self.selected_card().map(|c| c.event_id.clone());
        self.ranked = !self.ranked;
        self.reselect(current.as_deref());
    }

    pub fn select_next(&mut self) {
        let max = self.cards().len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.cards().len().saturating_sub(1);
    }

    fn previous_event_id(&self) -> Option<String> {
        self.selected_card().map(|c| c.event_id.clone())
    }

    fn reselect(&mut self, event_id: Option<&str>) {
        let cards = self.cards();
        self.selected = event_id
            .and_then(|id| cards.iter().position(|c| c.event_id == id))
            .unwrap_or(self.selected)
            .min(cards.len().saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub scoreboard: ScoreboardState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
