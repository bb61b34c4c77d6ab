use crate::Response;
use crate::decode::decode_scoreboard;
use chrono::{Days, NaiveDate};
use log::{debug, warn};
use reqwest::{Client, Url};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type FetchResult<T> = Result<T, FetchError>;

pub const ESPN_SCOREBOARD: &str =
    "https://site.api.espn.com/apis/site/v2/sports/football/college-football/scoreboard";
/// ESPN group id for FBS (Division I-A).
pub const FBS_GROUP: u32 = 80;
pub const DEFAULT_LIMIT: u32 = 300;
/// Days after today included in the default `dates` window.
pub const DEFAULT_WINDOW_DAYS: u64 = 6;

/// Why a fetch cycle failed. Transport kinds carry no body; only a body that
/// failed to decode explains itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("bad url: {0}")]
    BadUrl(String),
    #[error("request timed out")]
    Timeout,
    #[error("network error")]
    NetworkError,
    #[error("bad status: {0}")]
    BadStatus(u16),
    #[error("bad body: {0}")]
    BadBody(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::BadUrl(_) => "bad-url",
            FetchError::Timeout => "timeout",
            FetchError::NetworkError => "network-error",
            FetchError::BadStatus(_) => "bad-status",
            FetchError::BadBody(_) => "bad-body",
        }
    }

    /// Text worth showing under the kind. Only a decode failure has any; the
    /// transport kinds are reported by their tag alone.
    pub fn detail(&self) -> Option<String> {
        match self {
            FetchError::BadBody(detail) => Some(detail.clone()),
            FetchError::BadUrl(_)
            | FetchError::Timeout
            | FetchError::NetworkError
            | FetchError::BadStatus(_) => None,
        }
    }

    fn from_reqwest(e: &reqwest::Error, url: &str) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::BadUrl(url.to_owned())
        } else if let Some(status) = e.status() {
            FetchError::BadStatus(status.as_u16())
        } else {
            FetchError::NetworkError
        }
    }
}

/// Lifecycle of one fetch cycle. Never partially successful.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState<T> {
    #[default]
    Loading,
    Success(T),
    Failure(FetchError),
}

impl<T> FetchState<T> {
    pub fn from_result(result: FetchResult<T>) -> Self {
        match result {
            Ok(value) => FetchState::Success(value),
            Err(e) => FetchState::Failure(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn as_success(&self) -> Option<&T> {
        match self {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Inclusive `YYYYMMDD-YYYYMMDD` window, or a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn starting(start: NaiveDate, days: u64) -> Self {
        let end = start.checked_add_days(Days::new(days)).unwrap_or(start);
        Self { start, end }
    }

    pub fn to_query_value(self) -> String {
        let start = self.start.format("%Y%m%d");
        if self.start == self.end {
            start.to_string()
        } else {
            format!("{start}-{}", self.end.format("%Y%m%d"))
        }
    }
}

/// Query parameters for the scoreboard endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreboardQuery {
    /// Raw `dates` value; takes precedence over `range`.
    pub dates: Option<String>,
    pub range: Option<DateRange>,
    pub limit: u32,
    pub groups: u32,
}

impl Default for ScoreboardQuery {
    fn default() -> Self {
        Self {
            dates: None,
            range: None,
            limit: DEFAULT_LIMIT,
            groups: FBS_GROUP,
        }
    }
}

impl ScoreboardQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(dates) = self
            .dates
            .clone()
            .or_else(|| self.range.map(DateRange::to_query_value))
        {
            pairs.push(("dates", dates));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("groups", self.groups.to_string()));
        pairs
    }
}

/// Where a fetch cycle reads its JSON from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreboardSource {
    Remote { endpoint: String, query: ScoreboardQuery },
    /// Local snapshot, for testing against a fixed payload.
    File(PathBuf),
}

impl Default for ScoreboardSource {
    fn default() -> Self {
        ScoreboardSource::Remote {
            endpoint: ESPN_SCOREBOARD.to_owned(),
            query: ScoreboardQuery::default(),
        }
    }
}

/// College football scoreboard client backed by ESPN's public site API.
#[derive(Debug, Clone)]
pub struct CfbApi {
    client: Client,
    timeout: Duration,
    source: ScoreboardSource,
}

impl Default for CfbApi {
    fn default() -> Self {
        Self::new(ScoreboardSource::default())
    }
}

impl CfbApi {
    pub fn new(source: ScoreboardSource) -> Self {
        Self {
            client: Client::builder()
                .user_agent("cfbwatch/0.1 (terminal scoreboard)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            source,
        }
    }

    /// One fetch cycle: read the payload and decode it whole.
    /// No retry; a failure here is final for this cycle.
    pub async fn fetch_scoreboard(&self) -> FetchResult<Response> {
        let body = match &self.source {
            ScoreboardSource::Remote { endpoint, query } => {
                self.get_text(endpoint, &query.pairs()).await?
            }
            ScoreboardSource::File(path) => {
                debug!("reading scoreboard snapshot from {}", path.display());
                read_snapshot(path)?
            }
        };

        let response =
            decode_scoreboard(&body).map_err(|e| FetchError::BadBody(e.to_string()))?;
        debug!(
            "decoded {} events ({} competitions)",
            response.events.len(),
            response.competitions().count()
        );
        Ok(response)
    }

    async fn get_text(&self, endpoint: &str, query: &[(&str, String)]) -> FetchResult<String> {
        let url = Url::parse_with_params(endpoint, query)
            .map_err(|_| FetchError::BadUrl(endpoint.to_owned()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::BadUrl(endpoint.to_owned()));
        }
        debug!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&e, url.as_str()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("scoreboard request to {url} returned {status}");
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&e, url.as_str()))
    }
}

fn read_snapshot(path: &std::path::Path) -> FetchResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        warn!("could not read {} ({:?}): {e}", path.display(), e.kind());
        FetchError::BadUrl(path.display().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_range_formats_espn_window() {
        let range = DateRange::starting(day(2026, 10, 19), 6);
        assert_eq!(range.to_query_value(), "20261019-20261025");
    }

    #[test]
    fn single_day_range_has_no_dash() {
        let range = DateRange::starting(day(2026, 12, 31), 0);
        assert_eq!(range.to_query_value(), "20261231");
    }

    #[test]
    fn range_crosses_month_boundary() {
        let range = DateRange::starting(day(2026, 11, 28), 6);
        assert_eq!(range.to_query_value(), "20261128-20261204");
    }

    #[test]
    fn raw_dates_win_over_range() {
        let query = ScoreboardQuery {
            dates: Some("2026".into()),
            range: Some(DateRange::starting(day(2026, 10, 19), 6)),
            ..Default::default()
        };
        assert_eq!(query.pairs()[0], ("dates", "2026".to_string()));
    }

    #[test]
    fn default_query_has_limit_and_fbs_group() {
        let pairs = ScoreboardQuery::default().pairs();
        assert_eq!(
            pairs,
            vec![("limit", "300".to_string()), ("groups", "80".to_string())]
        );
    }

    #[test]
    fn error_kinds_are_stable_labels() {
        assert_eq!(FetchError::BadUrl("x".into()).kind(), "bad-url");
        assert_eq!(FetchError::Timeout.kind(), "timeout");
        assert_eq!(FetchError::NetworkError.kind(), "network-error");
        assert_eq!(FetchError::BadStatus(503).kind(), "bad-status");
        assert_eq!(FetchError::BadBody("x".into()).kind(), "bad-body");
    }

    #[test]
    fn only_decode_failures_carry_detail() {
        assert_eq!(FetchError::BadUrl("ftp://x".into()).detail(), None);
        assert_eq!(FetchError::Timeout.detail(), None);
        assert_eq!(FetchError::NetworkError.detail(), None);
        assert_eq!(FetchError::BadStatus(503).detail(), None);
        assert_eq!(
            FetchError::BadBody("missing required field `events`".into())
                .detail()
                .as_deref(),
            Some("missing required field `events`")
        );
    }

    #[test]
    fn fetch_state_maps_results() {
        let ok: FetchState<u8> = FetchState::from_result(Ok(3));
        assert_eq!(ok.as_success(), Some(&3));
        let failed: FetchState<u8> = FetchState::from_result(Err(FetchError::Timeout));
        assert_eq!(failed, FetchState::Failure(FetchError::Timeout));
        assert!(FetchState::<u8>::default().is_loading());
    }
}
