//! Renderable view of a competition. Formatting and geometry only: every
//! numeric or defaulting decision has already been made by `decode`, the
//! accessors in `lib.rs` and `watchability`.

use crate::watchability::{self, win_percentage};
use crate::{Competition, Competitor, Response};
use serde::Serialize;

/// Regular periods always shown, played or not.
pub const REGULAR_PERIODS: usize = 4;
/// Logical width of the probability track; renderers scale it to their own units.
pub const TRACK_WIDTH: f64 = 100.0;
pub const BAR_OUTLINE_COLOR: &str = "#5A5A5A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameCard {
    pub event_id: String,
    pub first: TeamDisplay,
    pub second: TeamDisplay,
    pub first_line: LineScoreRow,
    pub second_line: LineScoreRow,
    pub bar: ProbabilityBar,
    pub watchability: i64,
    pub status_detail: String,
    pub display_clock: String,
    pub period: u32,
    pub broadcast: String,
    pub odds: Option<String>,
    pub down_distance: Option<String>,
    pub possession_text: Option<String>,
    pub last_play: Option<String>,
    pub red_zone: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamDisplay {
    pub abbreviation: String,
    /// Empty when unranked.
    pub rank_label: String,
    pub primary_color: String,   // "#RRGGBB"
    pub secondary_color: String, // "#RRGGBB"
    pub logo: String,
    pub record: String,
    /// True for the `ERR` stand-in; render it as an error, not a team.
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineScoreRow {
    /// `None` for a regular period not played yet.
    pub periods: [Option<i32>; REGULAR_PERIODS],
    /// Points over all overtime periods, only when there were any.
    pub overtime: Option<i32>,
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSegment {
    pub proportion: f64,
    pub start: f64,
    pub end: f64,
    pub color: String,
}

/// First team grows from the left edge, second from the right; any tie
/// probability is the gap in between.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityBar {
    pub first: BarSegment,
    pub second: BarSegment,
    pub outline: String,
    pub track_width: f64,
}

impl GameCard {
    pub fn from_competition(event_id: &str, competition: &Competition) -> Self {
        let first = competition.first_competitor();
        let second = competition.second_competitor();
        let situation = competition.situation.as_ref();

        Self {
            event_id: event_id.to_owned(),
            first: TeamDisplay::from_competitor(first),
            second: TeamDisplay::from_competitor(second),
            first_line: LineScoreRow::from_competitor(first),
            second_line: LineScoreRow::from_competitor(second),
            bar: ProbabilityBar::new(
                win_percentage(competition, first),
                win_percentage(competition, second),
                &hex(&first.team.color),
                &hex(&second.team.color),
            ),
            watchability: watchability::score(competition),
            status_detail: competition.status.kind.short_detail.clone(),
            display_clock: competition.status.display_clock.clone(),
            period: competition.status.period,
            broadcast: broadcast_label(competition),
            odds: competition
                .odds
                .as_ref()
                .map(|o| format!("{} O/U {}", o.details, o.over_under)),
            down_distance: situation.and_then(|s| down_and_distance(s.down, s.distance)),
            possession_text: situation.and_then(|s| s.possession_text.clone()),
            last_play: situation
                .map(|s| s.last_play.text.clone())
                .filter(|t| !t.is_empty()),
            red_zone: situation.is_some_and(|s| s.is_red_zone),
        }
    }
}

/// Cards for every competition in feed order.
pub fn present(response: &Response) -> Vec<GameCard> {
    response
        .events
        .iter()
        .flat_map(|event| {
            event
                .competitions
                .iter()
                .map(|c| GameCard::from_competition(&event.id, c))
        })
        .collect()
}

/// Most watchable first; ties keep feed order.
pub fn rank_by_watchability(cards: &mut [GameCard]) {
    cards.sort_by(|a, b| b.watchability.cmp(&a.watchability));
}

impl TeamDisplay {
    pub fn from_competitor(competitor: &Competitor) -> Self {
        Self {
            abbreviation: competitor.team.abbreviation.clone(),
            rank_label: competitor
                .curated_rank
                .map(|r| r.to_string())
                .unwrap_or_default(),
            primary_color: hex(&competitor.team.color),
            secondary_color: hex(&competitor.team.alternate_color),
            logo: competitor.team.logo.clone(),
            record: competitor
                .records
                .first()
                .map(|r| r.summary.clone())
                .unwrap_or_default(),
            fallback: competitor.is_fallback(),
        }
    }
}

impl LineScoreRow {
    pub fn from_competitor(competitor: &Competitor) -> Self {
        let played = competitor.linescores.as_deref().unwrap_or_default();
        let mut periods = [None; REGULAR_PERIODS];
        for (slot, points) in periods.iter_mut().zip(played) {
            *slot = Some(*points);
        }
        let overtime: Option<i32> = (played.len() > REGULAR_PERIODS)
            .then(|| played.iter().skip(REGULAR_PERIODS).sum());

        Self {
            periods,
            overtime,
            total: competitor.total_score(),
        }
    }
}

impl ProbabilityBar {
    pub fn new(first: f64, second: f64, first_color: &str, second_color: &str) -> Self {
        let first = first.clamp(0.0, 1.0);
        let second = second.clamp(0.0, 1.0 - first);
        Self {
            first: BarSegment {
                proportion: first,
                start: 0.0,
                end: lerp(0.0, TRACK_WIDTH, first),
                color: first_color.to_owned(),
            },
            second: BarSegment {
                proportion: second,
                start: lerp(0.0, TRACK_WIDTH, 1.0 - second),
                end: TRACK_WIDTH,
                color: second_color.to_owned(),
            },
            outline: BAR_OUTLINE_COLOR.to_owned(),
            track_width: TRACK_WIDTH,
        }
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn hex(color: &str) -> String {
    format!("#{}", color.to_ascii_uppercase())
}

fn broadcast_label(competition: &Competition) -> String {
    competition
        .broadcasts
        .iter()
        .flat_map(|b| b.names.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("/")
}

fn down_and_distance(down: i32, distance: i32) -> Option<String> {
    let ordinal = match down {
        1 => "1st",
        2 => "2nd",
        3 => "3rd",
        4 => "4th",
        _ => return None,
    };
    Some(format!("{ordinal} & {distance}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{competition, competitor, situation};
    use crate::{Broadcast, Event, Odds, Record};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn line_score_pads_to_four_periods() {
        let mut c = competitor("333", "home", "AUB");
        c.linescores = Some(vec![7, 3]);
        let row = LineScoreRow::from_competitor(&c);
        assert_eq!(row.periods, [Some(7), Some(3), None, None]);
        assert_eq!(row.overtime, None);
        assert_eq!(row.total, 10);
    }

    #[test]
    fn line_score_exactly_four_has_no_overtime() {
        let mut c = competitor("333", "home", "AUB");
        c.linescores = Some(vec![7, 3, 0, 10]);
        let row = LineScoreRow::from_competitor(&c);
        assert_eq!(row.overtime, None);
        assert_eq!(row.total, 20);
    }

    #[test]
    fn line_score_folds_extra_periods_into_overtime() {
        let mut c = competitor("333", "home", "AUB");
        c.linescores = Some(vec![7, 3, 0, 10, 7, 0, 2]);
        let row = LineScoreRow::from_competitor(&c);
        assert_eq!(row.periods, [Some(7), Some(3), Some(0), Some(10)]);
        assert_eq!(row.overtime, Some(9));
        assert_eq!(row.total, 29);
    }

    #[test]
    fn line_score_without_periods_is_blank() {
        let row = LineScoreRow::from_competitor(&competitor("333", "home", "AUB"));
        assert_eq!(row.periods, [None; 4]);
        assert_eq!(row.total, 0);
    }

    #[test]
    fn team_display_formats_rank_and_colors() {
        let mut c = competitor("333", "home", "AUB");
        c.curated_rank = Some(7);
        c.records = vec![Record {
            name: Some("overall".into()),
            kind: "total".into(),
            summary: "6-1".into(),
        }];
        let team = TeamDisplay::from_competitor(&c);
        assert_eq!(team.rank_label, "7");
        assert_eq!(team.primary_color, "#9E1B32");
        assert_eq!(team.secondary_color, "#FFFFFF");
        assert_eq!(team.record, "6-1");
        assert!(!team.fallback);

        c.curated_rank = None;
        assert_eq!(TeamDisplay::from_competitor(&c).rank_label, "");
    }

    #[test]
    fn fallback_team_is_flagged() {
        let team = TeamDisplay::from_competitor(Competitor::fallback());
        assert_eq!(team.abbreviation, "ERR");
        assert!(team.fallback);
    }

    #[test]
    fn bar_segments_interpolate_along_track() {
        let bar = ProbabilityBar::new(0.25, 0.7, "#111111", "#222222");
        assert!(close(bar.first.start, 0.0));
        assert!(close(bar.first.end, 25.0));
        assert!(close(bar.second.start, 30.0));
        assert!(close(bar.second.end, 100.0));
        assert!(bar.first.end <= bar.second.start);
        assert_eq!(bar.outline, BAR_OUTLINE_COLOR);
    }

    #[test]
    fn bar_proportions_never_exceed_one() {
        let bar = ProbabilityBar::new(0.8, 0.8, "#111111", "#222222");
        assert!(bar.first.proportion + bar.second.proportion <= 1.0 + 1e-9);
        assert!(close(bar.second.start, bar.first.end));
    }

    #[test]
    fn card_without_situation_splits_bar_evenly() {
        let game = competition(vec![
            competitor("333", "home", "AUB"),
            competitor("2", "away", "ALA"),
        ]);
        let card = GameCard::from_competition("401", &game);
        assert!(close(card.bar.first.proportion, 0.5));
        assert!(close(card.bar.second.proportion, 0.5));
        assert!(card.down_distance.is_none());
        assert!(card.last_play.is_none());
        assert!(!card.red_zone);
    }

    #[test]
    fn card_carries_live_details() {
        let mut game = competition(vec![
            competitor("333", "home", "AUB"),
            competitor("2", "away", "ALA"),
        ]);
        let mut live = situation(0.6, 0.4);
        live.down = 3;
        live.distance = 7;
        live.is_red_zone = true;
        live.possession_text = Some("ALA 18".into());
        game.situation = Some(live);
        game.broadcasts = vec![Broadcast {
            market: "national".into(),
            names: vec!["CBS".into(), "Paramount+".into()],
        }];
        game.odds = Some(Odds {
            details: "ALA -3.5".into(),
            over_under: 51.5,
        });

        let card = GameCard::from_competition("401", &game);
        assert_eq!(card.down_distance.as_deref(), Some("3rd & 7"));
        assert_eq!(card.possession_text.as_deref(), Some("ALA 18"));
        assert_eq!(card.last_play.as_deref(), Some("Kickoff"));
        assert_eq!(card.broadcast, "CBS/Paramount+");
        assert_eq!(card.odds.as_deref(), Some("ALA -3.5 O/U 51.5"));
        assert!(card.red_zone);
        assert!(close(card.bar.first.proportion, 0.6));
        assert_eq!(card.watchability, watchability::score(&game));
    }

    #[test]
    fn present_flattens_and_ranks() {
        let mut calm = competition(vec![
            competitor("1", "home", "A"),
            competitor("2", "away", "B"),
        ]);
        calm.status.clock = 3000;
        let mut tight = calm.clone();
        tight.status.clock = 60;
        let response = Response {
            events: vec![
                Event {
                    id: "1".into(),
                    competitions: vec![calm],
                },
                Event {
                    id: "2".into(),
                    competitions: vec![tight],
                },
            ],
        };

        let mut cards = present(&response);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].event_id, "1");
        rank_by_watchability(&mut cards);
        assert_eq!(cards[0].event_id, "2");
    }
}
