pub mod client;
pub mod decode;
pub mod espn;
pub mod present;
pub mod watchability;

use serde::Serialize;
use std::sync::LazyLock;

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of ESPN wire format.
// Built once per successful fetch by decode.rs and never mutated afterwards.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    pub events: Vec<Event>,
}

impl Response {
    /// Every competition of every event, in feed order.
    pub fn competitions(&self) -> impl Iterator<Item = &Competition> {
        self.events.iter().flat_map(|e| e.competitions.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    /// Normally exactly one, but nothing here relies on that.
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Competition {
    pub date: String, // opaque, never parsed
    pub neutral_site: bool,
    pub conference_competition: bool,
    pub competitors: Vec<Competitor>,
    pub situation: Option<Situation>, // None outside of live play
    pub status: Status,
    pub broadcasts: Vec<Broadcast>,
    pub odds: Option<Odds>,
}

impl Competition {
    /// Competitor at position 0, or the `ERR` fallback when there is none.
    pub fn first_competitor(&self) -> &Competitor {
        self.competitors.first().unwrap_or(&FALLBACK_COMPETITOR)
    }

    /// Competitor at position 1, or the `ERR` fallback when there is none.
    pub fn second_competitor(&self) -> &Competitor {
        self.competitors.get(1).unwrap_or(&FALLBACK_COMPETITOR)
    }

    pub fn probability(&self) -> Option<&Probability> {
        self.situation.as_ref()?.last_play.probability.as_ref()
    }
}

pub const FALLBACK_ID: &str = "0";
pub const FALLBACK_ABBREVIATION: &str = "ERR";
pub const HOME: &str = "home";
pub const DEFAULT_ALTERNATE_COLOR: &str = "000000";

static FALLBACK_COMPETITOR: LazyLock<Competitor> = LazyLock::new(|| Competitor {
    id: FALLBACK_ID.into(),
    home_away: HOME.into(),
    team: Team {
        abbreviation: FALLBACK_ABBREVIATION.into(),
        color: DEFAULT_ALTERNATE_COLOR.into(),
        alternate_color: DEFAULT_ALTERNATE_COLOR.into(),
        logo: String::new(),
    },
    ..Default::default()
});

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Competitor {
    pub id: String,
    pub order: i32,
    /// Kept as the raw feed string; only an exact "home" counts as home.
    pub home_away: String,
    pub team: Team,
    /// Face-value display string from the feed. Totals come from `linescores`.
    pub score: String,
    /// None = no periods played yet, which is not the same as `Some(vec![])`.
    pub linescores: Option<Vec<i32>>,
    /// None = unranked (the feed's 99).
    pub curated_rank: Option<i32>,
    pub records: Vec<Record>,
}

impl Competitor {
    /// Stand-in for a missing competitor. It must show up as `ERR` on screen
    /// rather than pass for a real team.
    pub fn fallback() -> &'static Competitor {
        &FALLBACK_COMPETITOR
    }

    pub fn is_fallback(&self) -> bool {
        self.id == FALLBACK_ID && self.team.abbreviation == FALLBACK_ABBREVIATION
    }

    pub fn is_home(&self) -> bool {
        self.home_away == HOME
    }

    /// Sum of the period scores; 0 before any period has been played.
    pub fn total_score(&self) -> i32 {
        self.linescores.as_deref().unwrap_or_default().iter().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Team {
    pub abbreviation: String,
    pub color: String,           // hex, no leading '#'
    pub alternate_color: String, // hex, no leading '#', "000000" when the feed omits it
    pub logo: String,            // URL
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub name: Option<String>,
    pub kind: String, // "total", "home", "road", "vsconf"
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Situation {
    pub last_play: LastPlay,
    pub down: i32,
    pub yard_line: i32,
    pub distance: i32,
    pub possession_text: Option<String>,
    pub is_red_zone: bool,
    pub home_timeouts: i32,
    pub away_timeouts: i32,
    pub possession: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LastPlay {
    pub text: String,
    pub probability: Option<Probability>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Probability {
    pub tie_percentage: f64,
    pub home_win_percentage: f64,
    pub away_win_percentage: f64,
    pub seconds_left: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Status {
    /// Seconds remaining in the period.
    pub clock: i32,
    pub display_clock: String,
    pub period: u32,
    pub kind: StatusType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusType {
    pub name: String,
    pub short_detail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Broadcast {
    pub market: String,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Odds {
    pub details: String,
    pub over_under: f64,
}
