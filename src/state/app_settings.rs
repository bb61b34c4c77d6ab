use cfb_api::client::{
    DEFAULT_LIMIT, DEFAULT_WINDOW_DAYS, DateRange, ESPN_SCOREBOARD, FBS_GROUP, ScoreboardQuery,
    ScoreboardSource,
};
use chrono::{Local, NaiveDate};
use log::{LevelFilter, warn};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const SNAPSHOT_VAR: &str = "CFBWATCH_SCOREBOARD_JSON";
pub const ENDPOINT_VAR: &str = "CFBWATCH_ENDPOINT";
pub const DATES_VAR: &str = "CFBWATCH_DATES";
pub const LIMIT_VAR: &str = "CFBWATCH_LIMIT";
pub const GROUPS_VAR: &str = "CFBWATCH_GROUPS";
pub const REFRESH_VAR: &str = "CFBWATCH_REFRESH_SECS";
pub const LOG_VAR: &str = "CFBWATCH_LOG";

pub const DEFAULT_REFRESH_SECS: u64 = 60;

/// Read once at startup and never changed afterwards, apart from the
/// full-screen toggle.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub source: ScoreboardSource,
    /// `None` disables periodic refetching.
    pub refresh: Option<Duration>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            source: ScoreboardSource::default(),
            refresh: Some(Duration::from_secs(DEFAULT_REFRESH_SECS)),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), Local::now().date_naive())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, today: NaiveDate) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let source = match var(SNAPSHOT_VAR) {
            Some(path) => ScoreboardSource::File(PathBuf::from(path)),
            None => ScoreboardSource::Remote {
                endpoint: var(ENDPOINT_VAR).unwrap_or_else(|| ESPN_SCOREBOARD.to_owned()),
                query: ScoreboardQuery {
                    dates: var(DATES_VAR),
                    range: Some(DateRange::starting(today, DEFAULT_WINDOW_DAYS)),
                    limit: parse_or(LIMIT_VAR, var(LIMIT_VAR), DEFAULT_LIMIT),
                    groups: parse_or(GROUPS_VAR, var(GROUPS_VAR), FBS_GROUP),
                },
            },
        };

        let refresh_secs = parse_or(REFRESH_VAR, var(REFRESH_VAR), DEFAULT_REFRESH_SECS);

        Self {
            full_screen: false,
            log_level: var(LOG_VAR).and_then(|level| match LevelFilter::from_str(&level) {
                Ok(filter) => Some(filter),
                Err(_) => {
                    warn!("ignoring {LOG_VAR}={level}");
                    None
                }
            }),
            source,
            refresh: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
        }
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("ignoring {key}={raw}, not a number");
            default
        }),
        None => default,
    }
}
