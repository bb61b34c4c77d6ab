use std::fs;
use std::path::PathBuf;

use cfb_api::decode::{DecodeError, decode_scoreboard, decode_value};
use cfb_api::present::{present, rank_by_watchability};
use cfb_api::watchability::{self, win_percentage};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_value() -> serde_json::Value {
    serde_json::from_str(&read_fixture("scoreboard.json")).expect("fixture should be json")
}

#[test]
fn parses_scoreboard_fixture() {
    let response = decode_scoreboard(&read_fixture("scoreboard.json")).expect("fixture should decode");
    assert_eq!(response.events.len(), 3);
    assert_eq!(response.competitions().count(), 3);

    let live = &response.events[0].competitions[0];
    assert_eq!(live.first_competitor().team.abbreviation, "TENN");
    assert_eq!(live.second_competitor().team.abbreviation, "ALA");
    assert_eq!(live.status.clock, 512);
    assert_eq!(live.status.kind.short_detail, "8:32 - 4th");
    assert_eq!(live.broadcasts[0].names, vec!["ABC".to_string()]);
    assert!(live.conference_competition);

    let situation = live.situation.as_ref().expect("live game has a situation");
    assert_eq!(situation.down, 2);
    assert_eq!(situation.possession.as_deref(), Some("333"));
    assert_eq!(situation.possession_text.as_deref(), Some("TENN 37"));
}

#[test]
fn rank_sentinel_is_normalized() {
    let response = decode_scoreboard(&read_fixture("scoreboard.json")).unwrap();
    let ranks: Vec<_> = response
        .competitions()
        .flat_map(|c| c.competitors.iter().map(|t| t.curated_rank))
        .collect();
    assert_eq!(ranks, vec![Some(11), Some(7), None, Some(1), None, Some(24)]);
}

#[test]
fn totals_come_from_linescores() {
    let response = decode_scoreboard(&read_fixture("scoreboard.json")).unwrap();
    let live = &response.events[0].competitions[0];
    assert_eq!(live.first_competitor().total_score(), 17);
    assert_eq!(live.second_competitor().total_score(), 10);

    let scheduled = &response.events[1].competitions[0];
    assert!(scheduled.first_competitor().linescores.is_none());
    assert_eq!(scheduled.first_competitor().total_score(), 0);

    let overtime = &response.events[2].competitions[0];
    assert_eq!(overtime.first_competitor().total_score(), 31);
    assert_eq!(overtime.second_competitor().total_score(), 24);
}

#[test]
fn alternate_color_defaults_to_black() {
    let response = decode_scoreboard(&read_fixture("scoreboard.json")).unwrap();
    let purdue = response.events[1].competitions[0].first_competitor();
    assert_eq!(purdue.team.alternate_color, "000000");
}

#[test]
fn odds_collapse_to_first_book() {
    let response = decode_scoreboard(&read_fixture("scoreboard.json")).unwrap();
    let games: Vec<_> = response.competitions().collect();

    let listed = games[0].odds.as_ref().expect("first book kept");
    assert_eq!(listed.details, "ALA -2.5");
    assert_eq!(listed.over_under, 56.5);
    assert!(games[1].odds.is_none(), "empty list means no odds");
    assert_eq!(
        games[2].odds.as_ref().map(|o| o.details.as_str()),
        Some("ARMY -7.5")
    );
}

#[test]
fn situation_without_probability_is_neutral() {
    let response = decode_scoreboard(&read_fixture("scoreboard.json")).unwrap();
    let finished = &response.events[2].competitions[0];
    let situation = finished.situation.as_ref().unwrap();
    assert_eq!(situation.last_play.text, "End of Game");
    assert!(situation.last_play.probability.is_none());
    assert_eq!(situation.down, 0);
    assert_eq!(win_percentage(finished, finished.first_competitor()), 0.5);
    assert_eq!(win_percentage(finished, finished.second_competitor()), 0.5);
}

#[test]
fn scheduled_game_without_situation_is_neutral() {
    let response = decode_scoreboard(&read_fixture("scoreboard.json")).unwrap();
    let scheduled = &response.events[1].competitions[0];
    assert!(scheduled.situation.is_none());
    assert_eq!(win_percentage(scheduled, scheduled.first_competitor()), 0.5);
    assert_eq!(win_percentage(scheduled, scheduled.second_competitor()), 0.5);
    assert_eq!(watchability::score(scheduled), 0);
}

#[test]
fn watchability_over_fixture() {
    let response = decode_scoreboard(&read_fixture("scoreboard.json")).unwrap();
    let scores: Vec<_> = response.competitions().map(watchability::score).collect();
    // 0.08 * 3088 * 0.76, kickoff not reached, 0.08 * 3600 * 0.5
    assert_eq!(scores, vec![187, 0, 144]);
}

#[test]
fn presented_cards_rank_by_watchability() {
    let response = decode_scoreboard(&read_fixture("scoreboard.json")).unwrap();
    let mut cards = present(&response);
    rank_by_watchability(&mut cards);
    let order: Vec<_> = cards.iter().map(|c| c.event_id.as_str()).collect();
    assert_eq!(order, vec!["401628455", "401628501", "401628470"]);

    let overtime = &cards[1];
    assert_eq!(overtime.first_line.periods, [Some(7), Some(7), Some(3), Some(7)]);
    assert_eq!(overtime.first_line.overtime, Some(7));
    assert_eq!(overtime.second_line.overtime, Some(0));
    assert_eq!(overtime.first.record, "");
    assert_eq!(overtime.second.rank_label, "24");
    assert_eq!(overtime.broadcast, "");
}

#[test]
fn missing_status_fails_whole_response() {
    let mut value = fixture_value();
    value["events"][2]["competitions"][0]
        .as_object_mut()
        .unwrap()
        .remove("status");

    let err = decode_value(value).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Missing {
            path: "events[2].competitions[0].status".into()
        }
    );
}

#[test]
fn missing_required_competitor_field_reports_path() {
    let mut value = fixture_value();
    value["events"][0]["competitions"][0]["competitors"][1]
        .as_object_mut()
        .unwrap()
        .remove("homeAway");

    let err = decode_value(value).unwrap_err();
    assert_eq!(
        err.path(),
        Some("events[0].competitions[0].competitors[1].homeAway")
    );
}

#[test]
fn missing_events_is_an_error() {
    let err = decode_scoreboard("{}").unwrap_err();
    assert_eq!(err, DecodeError::Missing { path: "events".into() });
}

#[test]
fn clock_as_text_reports_its_path() {
    let mut value = fixture_value();
    value["events"][2]["competitions"][0]["status"]["clock"] = serde_json::json!("8:32");

    let from_text = decode_scoreboard(&value.to_string()).unwrap_err();
    assert_eq!(from_text.path(), Some("events[2].competitions[0].status.clock"));
    assert!(matches!(from_text, DecodeError::Shape { .. }), "{from_text:?}");

    let from_value = decode_value(value).unwrap_err();
    assert_eq!(from_value, from_text);
}

#[test]
fn unreadable_second_book_is_ignored() {
    let mut value = fixture_value();
    value["events"][0]["competitions"][0]["odds"][1]["overUnder"] = serde_json::json!("OFF");

    let response = decode_value(value).expect("only the first book is decoded");
    let odds = response.events[0].competitions[0].odds.as_ref().unwrap();
    assert_eq!(odds.details, "ALA -2.5");
    assert_eq!(odds.over_under, 56.5);
}

#[test]
fn unreadable_first_book_reports_its_path() {
    let mut value = fixture_value();
    value["events"][0]["competitions"][0]["odds"][0]["details"] = serde_json::json!(5);

    let err = decode_value(value).unwrap_err();
    assert_eq!(err.path(), Some("events[0].competitions[0].odds[0].details"));
}

#[test]
fn garbage_is_a_syntax_error() {
    assert!(matches!(
        decode_scoreboard("<html>503</html>"),
        Err(DecodeError::Syntax(_))
    ));
}

#[test]
fn zero_and_one_competitor_games_decode() {
    let mut value = fixture_value();
    value["events"][0]["competitions"][0]["competitors"] = serde_json::json!([]);
    value["events"][1]["competitions"][0]["competitors"]
        .as_array_mut()
        .unwrap()
        .truncate(1);

    let response = decode_value(value).expect("competitor count is not validated");
    let empty = &response.events[0].competitions[0];
    assert!(empty.competitors.is_empty());
    assert!(empty.first_competitor().is_fallback());
    assert!(empty.second_competitor().is_fallback());

    let single = &response.events[1].competitions[0];
    assert_eq!(single.first_competitor().team.abbreviation, "PUR");
    assert_eq!(single.second_competitor().team.abbreviation, "ERR");
}

#[test]
fn decoding_twice_gives_identical_results() {
    let raw = read_fixture("scoreboard.json");
    let a = decode_scoreboard(&raw).unwrap();
    let b = decode_scoreboard(&raw).unwrap();
    assert_eq!(a, b);
    assert_eq!(present(&a), present(&b));

    let derive = |r: &cfb_api::Response| -> Vec<(i32, Option<i32>, f64)> {
        r.competitions()
            .flat_map(|c| {
                c.competitors
                    .iter()
                    .map(move |t| (t.total_score(), t.curated_rank, win_percentage(c, t)))
            })
            .collect()
    };
    assert_eq!(derive(&a), derive(&b));
}
