// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{DrawResult, HitTally, MatchOutcome, ModelType, PrizeTable, PrizeTier, RecommendedSet};
pub use requests::{GenerateRequest, RecordDrawRequest};
pub use responses::{
    DeleteResponse, ErrorResponse, GenerateResponse, HealthResponse, RecommendationView,
    RecommendationsResponse, RecordDrawResponse, ScheduleResponse,
};
