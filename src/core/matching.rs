use crate::core::InvalidInput;
use crate::models::{DrawResult, HitTally, MatchOutcome, PrizeTier};

/// Smallest and largest playable number.
pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 45;

/// Numbers in a playable set.
pub const SET_SIZE: usize = 6;

/// Check that `numbers` is a well-formed playable set: exactly six distinct
/// values in 1-45.
pub fn validate_number_set(numbers: &[u8]) -> Result<(), InvalidInput> {
    if numbers.len() != SET_SIZE {
        return Err(InvalidInput::WrongCount(numbers.len()));
    }

    let mut seen = [false; (MAX_NUMBER as usize) + 1];
    for &n in numbers {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
            return Err(InvalidInput::OutOfRange(n));
        }
        if seen[n as usize] {
            return Err(InvalidInput::DuplicateNumber(n));
        }
        seen[n as usize] = true;
    }

    Ok(())
}

/// Check an official draw input: a well-formed winning set plus a bonus
/// number that is in range and disjoint from it.
pub fn validate_draw_input(winning: &[u8], bonus: u8) -> Result<(), InvalidInput> {
    validate_number_set(winning)?;
    if !(MIN_NUMBER..=MAX_NUMBER).contains(&bonus) {
        return Err(InvalidInput::OutOfRange(bonus));
    }
    if winning.contains(&bonus) {
        return Err(InvalidInput::BonusInWinningSet(bonus));
    }
    Ok(())
}

/// Compare a recommended set against an official draw result.
///
/// Tier assignment (first match wins):
///
/// | matched | bonus matched | tier |
/// |---------|---------------|------|
/// | 6       | -             | 1st  |
/// | 5       | yes           | 2nd  |
/// | 5       | no            | 3rd  |
/// | 4       | -             | 4th  |
/// | 3       | -             | 5th  |
/// | else    | -             | none |
pub fn evaluate(
    recommended: &[u8],
    winning: &[u8],
    bonus: u8,
) -> Result<MatchOutcome, InvalidInput> {
    validate_number_set(recommended)?;
    validate_number_set(winning)?;
    if !(MIN_NUMBER..=MAX_NUMBER).contains(&bonus) {
        return Err(InvalidInput::OutOfRange(bonus));
    }

    let matched_count = recommended
        .iter()
        .filter(|n| winning.contains(n))
        .count() as u8;
    let bonus_matched = recommended.contains(&bonus);

    let tier = match (matched_count, bonus_matched) {
        (6, _) => Some(PrizeTier::First),
        (5, true) => Some(PrizeTier::Second),
        (5, false) => Some(PrizeTier::Third),
        (4, _) => Some(PrizeTier::Fourth),
        (3, _) => Some(PrizeTier::Fifth),
        _ => None,
    };

    Ok(MatchOutcome {
        tier,
        matched_count,
        bonus_matched,
    })
}

/// A tally with every prize tier present at count zero.
pub fn empty_tally() -> HitTally {
    PrizeTier::ALL.iter().map(|&tier| (tier, 0)).collect()
}

/// Evaluate a recommended set against a whole draw history and tally the
/// prize tiers it would have reached.
///
/// Outcomes that reach no tier are not counted; an empty history yields an
/// all-zero tally.
pub fn evaluate_history(
    recommended: &[u8],
    past_draws: &[DrawResult],
) -> Result<HitTally, InvalidInput> {
    let mut tally = empty_tally();

    let outcomes = past_draws
        .iter()
        .map(|draw| evaluate(recommended, &draw.winning_numbers, draw.bonus_number));

    for outcome in outcomes {
        if let Some(tier) = outcome?.tier {
            *tally.entry(tier).or_default() += 1;
        }
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrizeTable;

    const WINNING: [u8; 6] = [1, 2, 3, 4, 5, 6];
    const BONUS: u8 = 7;

    fn draw(number: u32, winning: [u8; 6], bonus: u8) -> DrawResult {
        DrawResult {
            draw_number: number,
            winning_numbers: winning.to_vec(),
            bonus_number: bonus,
            prizes: PrizeTable::new(),
            draw_date: None,
        }
    }

    #[test]
    fn test_six_matches_is_first_tier() {
        let outcome = evaluate(&[1, 2, 3, 4, 5, 6], &WINNING, BONUS).unwrap();
        assert_eq!(outcome.tier, Some(PrizeTier::First));
        assert_eq!(outcome.matched_count, 6);
        assert!(!outcome.bonus_matched);
    }

    #[test]
    fn test_five_matches_with_bonus_is_second_tier() {
        let outcome = evaluate(&[1, 2, 3, 4, 5, 7], &WINNING, BONUS).unwrap();
        assert_eq!(outcome.tier, Some(PrizeTier::Second));
        assert_eq!(outcome.matched_count, 5);
        assert!(outcome.bonus_matched);
    }

    #[test]
    fn test_five_matches_without_bonus_is_third_tier() {
        let outcome = evaluate(&[1, 2, 3, 4, 5, 8], &WINNING, BONUS).unwrap();
        assert_eq!(outcome.tier, Some(PrizeTier::Third));
        assert!(!outcome.bonus_matched);
    }

    #[test]
    fn test_four_matches_is_fourth_tier_even_with_bonus() {
        // The bonus only upgrades a five-match set.
        let outcome = evaluate(&[1, 2, 3, 4, 7, 40], &WINNING, BONUS).unwrap();
        assert_eq!(outcome.tier, Some(PrizeTier::Fourth));
        assert!(outcome.bonus_matched);
    }

    #[test]
    fn test_three_matches_is_fifth_tier() {
        let outcome = evaluate(&[1, 2, 3, 40, 41, 42], &WINNING, BONUS).unwrap();
        assert_eq!(outcome.tier, Some(PrizeTier::Fifth));
    }

    #[test]
    fn test_two_or_fewer_matches_is_no_tier() {
        let outcome = evaluate(&[1, 2, 7, 40, 41, 42], &WINNING, BONUS).unwrap();
        assert_eq!(outcome.tier, None);
        assert_eq!(outcome.matched_count, 2);
        assert!(outcome.bonus_matched);

        let outcome = evaluate(&[10, 11, 12, 13, 14, 15], &WINNING, BONUS).unwrap();
        assert_eq!(outcome.tier, None);
        assert_eq!(outcome.matched_count, 0);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let first = evaluate(&[1, 2, 3, 4, 5, 8], &WINNING, BONUS).unwrap();
        let second = evaluate(&[1, 2, 3, 4, 5, 8], &WINNING, BONUS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_sets_rejected() {
        assert_eq!(
            evaluate(&[1, 2, 3, 4, 5], &WINNING, BONUS),
            Err(InvalidInput::WrongCount(5))
        );
        assert_eq!(
            evaluate(&[1, 2, 3, 4, 5, 5], &WINNING, BONUS),
            Err(InvalidInput::DuplicateNumber(5))
        );
        assert_eq!(
            evaluate(&[1, 2, 3, 4, 5, 46], &WINNING, BONUS),
            Err(InvalidInput::OutOfRange(46))
        );
        assert_eq!(
            evaluate(&[1, 2, 3, 4, 5, 6], &[1, 2, 3, 4, 5, 0], BONUS),
            Err(InvalidInput::OutOfRange(0))
        );
        assert_eq!(
            evaluate(&[1, 2, 3, 4, 5, 6], &WINNING, 46),
            Err(InvalidInput::OutOfRange(46))
        );
    }

    #[test]
    fn test_validate_draw_input_accepts_disjoint_bonus() {
        assert!(validate_draw_input(&[7, 9, 11, 21, 30, 35], 29).is_ok());
    }

    #[test]
    fn test_validate_draw_input_rejects_bonus_in_winning_set() {
        assert_eq!(
            validate_draw_input(&[7, 9, 11, 21, 30, 35], 11),
            Err(InvalidInput::BonusInWinningSet(11))
        );
    }

    #[test]
    fn test_validate_draw_input_checks_bonus_range() {
        assert_eq!(
            validate_draw_input(&WINNING, 0),
            Err(InvalidInput::OutOfRange(0))
        );
        assert_eq!(
            validate_draw_input(&WINNING, 46),
            Err(InvalidInput::OutOfRange(46))
        );
    }

    #[test]
    fn test_validate_draw_input_checks_winning_set_first() {
        assert_eq!(
            validate_draw_input(&[1, 2, 3, 4, 5], 7),
            Err(InvalidInput::WrongCount(5))
        );
    }

    #[test]
    fn test_evaluate_history_tallies_tiers() {
        let history = vec![
            draw(100, [1, 2, 3, 4, 5, 6], 7),    // 6 matches -> 1st
            draw(101, [1, 2, 3, 4, 5, 40], 6),   // 5 matches + bonus -> 2nd
            draw(102, [1, 2, 3, 40, 41, 42], 7), // 3 matches -> 5th
            draw(103, [40, 41, 42, 43, 44, 45], 39), // no tier
        ];

        let tally = evaluate_history(&[1, 2, 3, 4, 5, 6], &history).unwrap();
        assert_eq!(tally[&PrizeTier::First], 1);
        assert_eq!(tally[&PrizeTier::Second], 1);
        assert_eq!(tally[&PrizeTier::Third], 0);
        assert_eq!(tally[&PrizeTier::Fourth], 0);
        assert_eq!(tally[&PrizeTier::Fifth], 1);
    }

    #[test]
    fn test_evaluate_history_empty_is_all_zero() {
        let tally = evaluate_history(&[1, 2, 3, 4, 5, 6], &[]).unwrap();
        assert_eq!(tally.len(), 5);
        assert!(tally.values().all(|&count| count == 0));
    }

    #[test]
    fn test_evaluate_history_rejects_malformed_set() {
        let history = vec![draw(100, WINNING, BONUS)];
        assert_eq!(
            evaluate_history(&[1, 2, 3], &history),
            Err(InvalidInput::WrongCount(3))
        );
    }
}
