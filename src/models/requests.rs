use crate::models::domain::{ModelType, PrizeTable};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to generate and store recommended sets for a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default = "default_model_type")]
    #[serde(alias = "model_type", rename = "modelType")]
    pub model_type: ModelType,
    #[validate(range(min = 1, max = 5))]
    #[serde(default = "default_num_sets")]
    #[serde(alias = "num_sets", rename = "numSets")]
    pub num_sets: u8,
}

fn default_model_type() -> ModelType {
    ModelType::Statistical
}

fn default_num_sets() -> u8 {
    1
}

/// Administrative request to record an official draw result.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordDrawRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "draw_number", rename = "drawNumber")]
    pub draw_number: u32,
    pub winning_numbers: Vec<u8>,
    pub bonus_number: u8,
    #[serde(default)]
    pub prizes: PrizeTable,
}
