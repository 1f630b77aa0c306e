// Integration tests for Lotto Algo

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use lotto_algo::core::{evaluate, evaluate_history, next_draw_date, next_draw_number};
use lotto_algo::models::{DrawResult, PrizeTier, RecommendedSet, ModelType};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draw(number: u32, winning: [u8; 6], bonus: u8) -> DrawResult {
    DrawResult {
        draw_number: number,
        winning_numbers: winning.to_vec(),
        bonus_number: bonus,
        prizes: Default::default(),
        draw_date: None,
    }
}

#[test]
fn test_schedule_and_numbering_agree_over_a_draw_cycle() {
    // Walk a month of reference dates; every computed draw date must be the
    // Saturday of its own week (or the next one, when starting on Saturday),
    // and the draw numbering advances one per recorded draw.
    let mut reference = date(2025, 3, 1); // A Saturday.
    let mut latest_draw_number = 1160;

    for _ in 0..4 {
        let draw_date = next_draw_date(reference);
        assert_eq!(draw_date.weekday(), Weekday::Sat);
        assert!(draw_date > reference);

        latest_draw_number = next_draw_number(latest_draw_number).unwrap();
        reference = draw_date;
    }

    assert_eq!(latest_draw_number, 1164);
    assert_eq!(reference, date(2025, 3, 29));
}

#[test]
fn test_stored_recommendation_evaluates_against_new_draw() {
    // A user stores a recommendation targeting draw 1176; when that draw is
    // later recorded, the on-demand outcome and the refreshed history tally
    // must agree.
    let stored = RecommendedSet {
        id: Some("rec-1".to_string()),
        user_id: "alice".to_string(),
        draw_number: 1176,
        numbers: vec![7, 9, 11, 21, 30, 35],
        model_type: ModelType::Statistical,
        historical_hit_rates: Default::default(),
        created_at: None,
    };

    let mut history = vec![
        draw(1174, [1, 2, 3, 4, 5, 6], 7),
        draw(1175, [7, 9, 40, 41, 42, 43], 44),
    ];

    // Draw 1176 comes in: five of the stored numbers plus the bonus.
    let new_draw = draw(1176, [7, 9, 11, 21, 30, 44], 35);
    let outcome = evaluate(&stored.numbers, &new_draw.winning_numbers, new_draw.bonus_number)
        .unwrap();
    assert_eq!(outcome.tier, Some(PrizeTier::Second));
    assert_eq!(outcome.matched_count, 5);
    assert!(outcome.bonus_matched);

    history.push(new_draw);
    let tally = evaluate_history(&stored.numbers, &history).unwrap();
    assert_eq!(tally[&PrizeTier::Second], 1);
    assert_eq!(tally[&PrizeTier::First], 0);
    // Draw 1175 shared only two numbers, so nothing else tallies.
    assert_eq!(tally[&PrizeTier::Fifth], 0);
}

#[test]
fn test_evaluation_reads_nothing_but_its_arguments() {
    // Idempotence across interleaved calls: outcomes depend only on the
    // arguments, with no hidden state between calls.
    let winning = [1, 2, 3, 4, 5, 6];
    let first = evaluate(&[1, 2, 3, 4, 5, 8], &winning, 7).unwrap();
    let _ = evaluate(&[10, 11, 12, 13, 14, 15], &winning, 7).unwrap();
    let second = evaluate(&[1, 2, 3, 4, 5, 8], &winning, 7).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_document_round_trip_preserves_tally() {
    // A recommendation evaluated, serialized into its document form, parsed
    // back, and re-evaluated carries identical hit rates.
    let history = vec![
        draw(1170, [3, 8, 14, 22, 31, 42], 19),
        draw(1171, [3, 8, 14, 1, 2, 4], 5),
    ];
    let numbers = vec![3, 8, 14, 22, 31, 42];
    let tally = evaluate_history(&numbers, &history).unwrap();

    let set = RecommendedSet {
        id: None,
        user_id: "alice".to_string(),
        draw_number: 1172,
        numbers,
        model_type: ModelType::Ml,
        historical_hit_rates: tally.clone(),
        created_at: None,
    };

    let json = serde_json::to_string(&set).unwrap();
    let parsed: RecommendedSet = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.historical_hit_rates, tally);
    assert_eq!(parsed.historical_hit_rates[&PrizeTier::First], 1);
    assert_eq!(parsed.historical_hit_rates[&PrizeTier::Fifth], 1);
}

#[test]
fn test_weekday_offsets_follow_the_documented_table() {
    // 2025-06-01 is a Sunday; offsets to the coming Saturday shrink from six
    // days to one, then Saturday itself jumps a full week.
    let expected_offsets = [6, 5, 4, 3, 2, 1, 7];
    for (day_index, expected) in expected_offsets.iter().enumerate() {
        let reference = date(2025, 6, 1) + Duration::days(day_index as i64);
        let offset = (next_draw_date(reference) - reference).num_days();
        assert_eq!(offset, *expected, "reference {}", reference);
    }
}
