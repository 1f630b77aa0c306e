// Core algorithm exports
pub mod matching;
pub mod schedule;

use thiserror::Error;

pub use matching::{empty_tally, evaluate, evaluate_history, validate_draw_input, validate_number_set};
pub use schedule::{next_draw_date, next_draw_number};

/// Malformed input to one of the pure core functions.
///
/// The core has no other error class: nothing here is retryable and nothing
/// produces a partial result. Failures are detected synchronously at the call
/// boundary; presenting them to an end user is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("expected exactly 6 numbers, got {0}")]
    WrongCount(usize),

    #[error("number {0} is outside the valid range 1-45")]
    OutOfRange(u8),

    #[error("duplicate number {0} in set")]
    DuplicateNumber(u8),

    #[error("bonus number {0} also appears in the winning numbers")]
    BonusInWinningSet(u8),

    #[error("draw number must be a positive integer")]
    NonPositiveDrawNumber,
}
