//! Lotto Algo - draw schedule and recommendation match service
//!
//! This library provides the pure scheduling and match-rate core behind the
//! Lucky Vicky lotto client, plus the HTTP glue that connects it to the
//! remote number generator and the Appwrite document store.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{evaluate, evaluate_history, next_draw_date, next_draw_number, InvalidInput};
pub use crate::models::{DrawResult, HitTally, MatchOutcome, ModelType, PrizeTier, RecommendedSet};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Weekday};

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let reference = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        assert_eq!(next_draw_date(reference).weekday(), Weekday::Sat);
    }
}
