use crate::state::network::LoadingState;
use cfb_api::client::FetchError;
use cfb_api::present::GameCard;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    FetchScoreboard,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// A fetch cycle began; the scoreboard is `Loading` until it ends.
    FetchStarted,
    /// Every competition of the response, in feed order.
    ScoreboardLoaded { cards: Vec<GameCard> },
    FetchFailed { error: FetchError },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
