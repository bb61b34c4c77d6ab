/// ESPN college-football scoreboard wire types: serde shapes for the raw feed.
/// Every field is optional here; which ones are actually required, and what the
/// others default to, is decided in decode.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub date: Option<String>, // ISO 8601, kept opaque
    #[serde(rename = "neutralSite")]
    pub neutral_site: Option<bool>,
    #[serde(rename = "conferenceCompetition")]
    pub conference_competition: Option<bool>,
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub situation: Option<EspnSituation>,
    pub status: Option<EspnStatus>,
    pub broadcasts: Option<Vec<EspnBroadcast>>,
    /// Usually a list of books; older payloads carry a single object. Kept raw so
    /// only the book that is shown gets decoded into [`EspnOdds`].
    pub odds: Option<OneOrMany<serde_json::Value>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    pub order: Option<i32>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
    pub linescores: Option<Vec<EspnLinescore>>,
    #[serde(rename = "curatedRank")]
    pub curated_rank: Option<EspnRank>,
    pub records: Option<Vec<EspnRecord>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    pub abbreviation: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "alternateColor")]
    pub alternate_color: Option<String>,
    pub logo: Option<String>,
}

/// One period's points. The site API wraps it as `{ "value": 7.0 }`, some
/// snapshots flatten it to a bare number.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(untagged)]
pub enum EspnLinescore {
    Plain(f64),
    Entry { value: f64 },
}

impl EspnLinescore {
    pub fn value(self) -> f64 {
        match self {
            EspnLinescore::Plain(v) | EspnLinescore::Entry { value: v } => v,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnRank {
    pub current: Option<i32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnRecord {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnSituation {
    #[serde(rename = "lastPlay")]
    pub last_play: Option<EspnLastPlay>,
    pub down: Option<i32>,
    #[serde(rename = "yardLine")]
    pub yard_line: Option<i32>,
    pub distance: Option<i32>,
    #[serde(rename = "possessionText")]
    pub possession_text: Option<String>,
    #[serde(rename = "isRedZone")]
    pub is_red_zone: Option<bool>,
    #[serde(rename = "homeTimeouts")]
    pub home_timeouts: Option<i32>,
    #[serde(rename = "awayTimeouts")]
    pub away_timeouts: Option<i32>,
    pub possession: Option<String>, // team id
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLastPlay {
    pub text: Option<String>,
    pub probability: Option<EspnProbability>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnProbability {
    #[serde(rename = "tiePercentage")]
    pub tie_percentage: Option<f64>,
    #[serde(rename = "homeWinPercentage")]
    pub home_win_percentage: Option<f64>,
    #[serde(rename = "awayWinPercentage")]
    pub away_win_percentage: Option<f64>,
    #[serde(rename = "secondsLeft")]
    pub seconds_left: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    /// Seconds left in the period; ESPN serializes it as a float (`900.0`).
    pub clock: Option<f64>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
    pub period: Option<u32>,
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    pub name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBroadcast {
    pub market: Option<String>,
    pub names: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnOdds {
    pub details: Option<String>,
    #[serde(rename = "overUnder")]
    pub over_under: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Keep only the first entry; the feed may list several books but one is shown.
    pub fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::Many(items) => items.into_iter().next(),
            OneOrMany::One(item) => Some(item),
        }
    }
}
