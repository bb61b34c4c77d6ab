use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use cfb_api::client::FetchError;
use cfb_api::present::GameCard;
use chrono::Local;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Scoreboard,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_fetch_started(&mut self) {
        self.state.scoreboard.start_loading();
    }

    pub fn on_scoreboard_loaded(&mut self, cards: Vec<GameCard>) {
        let fetched_at = Local::now().format("%H:%M:%S").to_string();
        self.state.scoreboard.load(cards, fetched_at);
    }

    pub fn on_fetch_failed(&mut self, error: FetchError) {
        self.state.scoreboard.fail(error);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}
