use crate::core::InvalidInput;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Calculate the date of the next official draw.
///
/// Draws take place every Saturday. A reference date that already falls on a
/// Saturday yields the *following* Saturday (reference + 7 days), not the
/// reference itself; any other weekday yields the soonest Saturday strictly
/// after the reference date.
pub fn next_draw_date(reference: NaiveDate) -> NaiveDate {
    // Saturday is handled up front, so the modulo below is always 1..=6 and
    // the result is strictly after the reference date.
    let days_ahead = if reference.weekday() == Weekday::Sat {
        7
    } else {
        (6 - reference.weekday().num_days_from_sunday() + 7) % 7
    };

    reference + Duration::days(days_ahead as i64)
}

/// Calculate the draw number following the latest known draw.
///
/// Fails with [`InvalidInput::NonPositiveDrawNumber`] when `latest` is zero;
/// draw numbering starts at 1.
pub fn next_draw_number(latest: u32) -> Result<u32, InvalidInput> {
    if latest == 0 {
        return Err(InvalidInput::NonPositiveDrawNumber);
    }
    Ok(latest + 1)
}
