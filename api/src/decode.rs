//! Wire → domain decoding for the scoreboard feed.
//!
//! serde only checks JSON shape here; every required/optional decision and
//! every default lives in the `map_*` functions below. One bad field anywhere
//! fails the whole response, so a render never mixes feed versions.

use crate::espn::{
    EspnBroadcast, EspnCompetition, EspnCompetitor, EspnEvent, EspnLastPlay, EspnLinescore,
    EspnOdds, EspnProbability, EspnRecord, EspnSituation, EspnStatus, EspnTeam, OneOrMany,
    ScoreboardResponse,
};
use crate::{
    Broadcast, Competition, Competitor, DEFAULT_ALTERNATE_COLOR, Event, LastPlay, Odds,
    Probability, Record, Response, Situation, Status, StatusType, Team,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::error::Category;
use thiserror::Error;

/// `curatedRank.current` value ESPN uses for "not ranked".
pub const UNRANKED: i32 = 99;

pub type DecodeResult<T> = Result<T, DecodeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not JSON at all.
    #[error("malformed scoreboard json: {0}")]
    Syntax(String),
    /// Valid JSON with the wrong shape at `path`, e.g. a string where a number belongs.
    #[error("unexpected json at `{path}`: {message}")]
    Shape { path: String, message: String },
    #[error("missing required field `{path}`")]
    Missing { path: String },
    #[error("expected {expected} at `{path}`, found {found}")]
    Invalid {
        path: String,
        expected: &'static str,
        found: String,
    },
}

impl DecodeError {
    pub fn path(&self) -> Option<&str> {
        match self {
            DecodeError::Syntax(_) => None,
            DecodeError::Shape { path, .. }
            | DecodeError::Missing { path }
            | DecodeError::Invalid { path, .. } => Some(path),
        }
    }
}

pub fn decode_scoreboard(json: &str) -> DecodeResult<Response> {
    let mut de = serde_json::Deserializer::from_str(json);
    let raw: ScoreboardResponse =
        serde_path_to_error::deserialize(&mut de).map_err(|e| wire_error(e, ""))?;
    de.end().map_err(|e| DecodeError::Syntax(e.to_string()))?;
    map_response(raw)
}

pub fn decode_value(value: Value) -> DecodeResult<Response> {
    map_response(from_wire(value, "")?)
}

/// Deserialize a wire shape nested at `path`, keeping the path on failure.
fn from_wire<T: DeserializeOwned>(value: Value, path: &str) -> DecodeResult<T> {
    serde_path_to_error::deserialize(value).map_err(|e| wire_error(e, path))
}

fn wire_error(e: serde_path_to_error::Error<serde_json::Error>, prefix: &str) -> DecodeError {
    let inner_path = e.path().to_string();
    let inner = e.into_inner();
    if !matches!(inner.classify(), Category::Data) {
        return DecodeError::Syntax(inner.to_string());
    }

    // serde_path_to_error renders the root as "."
    let path = match (prefix.is_empty(), inner_path.as_str()) {
        (_, ".") => prefix.to_owned(),
        (true, p) => p.to_owned(),
        (false, p) if p.starts_with('[') => format!("{prefix}{p}"),
        (false, p) => format!("{prefix}.{p}"),
    };
    if path.is_empty() {
        return DecodeError::Syntax(inner.to_string());
    }
    DecodeError::Shape {
        path,
        message: inner.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn field(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_owned()
    } else {
        format!("{path}.{name}")
    }
}

fn index(path: &str, i: usize) -> String {
    format!("{path}[{i}]")
}

fn required<T>(value: Option<T>, path: &str, name: &str) -> DecodeResult<T> {
    value.ok_or_else(|| DecodeError::Missing {
        path: field(path, name),
    })
}

fn integral(value: f64, path: String) -> DecodeResult<i32> {
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(DecodeError::Invalid {
            path,
            expected: "an integer",
            found: value.to_string(),
        });
    }
    Ok(value as i32)
}

fn map_list<W, T>(
    items: Vec<W>,
    path: &str,
    map: impl Fn(W, &str) -> DecodeResult<T>,
) -> DecodeResult<Vec<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| map(item, &index(path, i)))
        .collect()
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_response(raw: ScoreboardResponse) -> DecodeResult<Response> {
    let events = required(raw.events, "", "events")?;
    Ok(Response {
        events: map_list(events, "events", map_event)?,
    })
}

fn map_event(raw: EspnEvent, path: &str) -> DecodeResult<Event> {
    let competitions = required(raw.competitions, path, "competitions")?;
    Ok(Event {
        id: required(raw.id, path, "id")?,
        competitions: map_list(competitions, &field(path, "competitions"), map_competition)?,
    })
}

fn map_competition(raw: EspnCompetition, path: &str) -> DecodeResult<Competition> {
    let competitors = required(raw.competitors, path, "competitors")?;
    let broadcasts = required(raw.broadcasts, path, "broadcasts")?;

    // A list of books collapses to its first entry; an empty list means no odds.
    // Books after the first are never deserialized.
    let odds_path = match &raw.odds {
        Some(OneOrMany::Many(_)) => index(&field(path, "odds"), 0),
        _ => field(path, "odds"),
    };
    let odds = raw
        .odds
        .and_then(OneOrMany::into_first)
        .map(|book| map_odds(from_wire::<EspnOdds>(book, &odds_path)?, &odds_path))
        .transpose()?;

    Ok(Competition {
        date: required(raw.date, path, "date")?,
        neutral_site: required(raw.neutral_site, path, "neutralSite")?,
        conference_competition: required(
            raw.conference_competition,
            path,
            "conferenceCompetition",
        )?,
        competitors: map_list(competitors, &field(path, "competitors"), map_competitor)?,
        situation: raw
            .situation
            .map(|s| map_situation(s, &field(path, "situation")))
            .transpose()?,
        status: map_status(required(raw.status, path, "status")?, &field(path, "status"))?,
        broadcasts: map_list(broadcasts, &field(path, "broadcasts"), map_broadcast)?,
        odds,
    })
}

fn map_competitor(raw: EspnCompetitor, path: &str) -> DecodeResult<Competitor> {
    let rank = required(raw.curated_rank, path, "curatedRank")?;
    let current = required(rank.current, &field(path, "curatedRank"), "current")?;
    let records = required(raw.records, path, "records")?;

    let linescores = raw
        .linescores
        .map(|periods| map_linescores(periods, &field(path, "linescores")))
        .transpose()?;

    Ok(Competitor {
        id: required(raw.id, path, "id")?,
        order: required(raw.order, path, "order")?,
        home_away: required(raw.home_away, path, "homeAway")?,
        team: map_team(required(raw.team, path, "team")?, &field(path, "team"))?,
        score: required(raw.score, path, "score")?,
        linescores,
        curated_rank: normalize_rank(current),
        records: map_list(records, &field(path, "records"), map_record)?,
    })
}

/// 99 is the feed's "unranked" marker. This is the only place it is interpreted.
pub fn normalize_rank(current: i32) -> Option<i32> {
    (current != UNRANKED).then_some(current)
}

fn map_linescores(periods: Vec<EspnLinescore>, path: &str) -> DecodeResult<Vec<i32>> {
    periods
        .into_iter()
        .enumerate()
        .map(|(i, period)| integral(period.value(), index(path, i)))
        .collect()
}

fn map_team(raw: EspnTeam, path: &str) -> DecodeResult<Team> {
    Ok(Team {
        abbreviation: required(raw.abbreviation, path, "abbreviation")?,
        color: required(raw.color, path, "color")?,
        alternate_color: raw
            .alternate_color
            .unwrap_or_else(|| DEFAULT_ALTERNATE_COLOR.to_owned()),
        logo: required(raw.logo, path, "logo")?,
    })
}

fn map_record(raw: EspnRecord, path: &str) -> DecodeResult<Record> {
    Ok(Record {
        name: raw.name,
        kind: required(raw.record_type, path, "type")?,
        summary: required(raw.summary, path, "summary")?,
    })
}

/// Later feed versions dropped most situation fields mid-season, so everything
/// inside a present situation falls back to zero/false/empty.
fn map_situation(raw: EspnSituation, path: &str) -> DecodeResult<Situation> {
    let last_play = raw
        .last_play
        .map(|lp| map_last_play(lp, &field(path, "lastPlay")))
        .transpose()?
        .unwrap_or_default();

    Ok(Situation {
        last_play,
        down: raw.down.unwrap_or_default(),
        yard_line: raw.yard_line.unwrap_or_default(),
        distance: raw.distance.unwrap_or_default(),
        possession_text: raw.possession_text,
        is_red_zone: raw.is_red_zone.unwrap_or_default(),
        home_timeouts: raw.home_timeouts.unwrap_or_default(),
        away_timeouts: raw.away_timeouts.unwrap_or_default(),
        possession: raw.possession,
    })
}

fn map_last_play(raw: EspnLastPlay, path: &str) -> DecodeResult<LastPlay> {
    Ok(LastPlay {
        text: raw.text.unwrap_or_default(),
        probability: raw
            .probability
            .map(|p| map_probability(p, &field(path, "probability")))
            .transpose()?,
    })
}

fn map_probability(raw: EspnProbability, path: &str) -> DecodeResult<Probability> {
    Ok(Probability {
        tie_percentage: required(raw.tie_percentage, path, "tiePercentage")?,
        home_win_percentage: required(raw.home_win_percentage, path, "homeWinPercentage")?,
        away_win_percentage: required(raw.away_win_percentage, path, "awayWinPercentage")?,
        seconds_left: required(raw.seconds_left, path, "secondsLeft")?,
    })
}

fn map_status(raw: EspnStatus, path: &str) -> DecodeResult<Status> {
    let status_type = required(raw.status_type, path, "type")?;
    let type_path = field(path, "type");
    Ok(Status {
        clock: integral(required(raw.clock, path, "clock")?, field(path, "clock"))?,
        display_clock: required(raw.display_clock, path, "displayClock")?,
        period: required(raw.period, path, "period")?,
        kind: StatusType {
            name: required(status_type.name, &type_path, "name")?,
            short_detail: required(status_type.short_detail, &type_path, "shortDetail")?,
        },
    })
}

fn map_broadcast(raw: EspnBroadcast, path: &str) -> DecodeResult<Broadcast> {
    Ok(Broadcast {
        market: required(raw.market, path, "market")?,
        names: required(raw.names, path, "names")?,
    })
}

fn map_odds(raw: EspnOdds, path: &str) -> DecodeResult<Odds> {
    Ok(Odds {
        details: required(raw.details, path, "details")?,
        over_under: required(raw.over_under, path, "overUnder")?,
    })
}
