use crate::core::{evaluate, evaluate_history, validate_number_set};
use crate::models::{
    DrawResult, ErrorResponse, GenerateRequest, GenerateResponse, RecommendationView,
    RecommendationsResponse, RecommendedSet, DeleteResponse,
};
use crate::routes::draws::{cached_draw_history, cached_latest_draw};
use crate::routes::AppState;
use crate::services::AppwriteError;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/recommendations/generate",
        web::post().to(generate_recommendations),
    )
    .route("/recommendations/all", web::get().to(list_all_recommendations))
    .route("/recommendations", web::get().to(list_recommendations))
    .route(
        "/recommendations/{id}",
        web::delete().to(delete_recommendation),
    );
}

/// Generate recommendations endpoint
///
/// POST /api/v1/recommendations/generate
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "modelType": "statistical|ml",
///   "numSets": 1
/// }
/// ```
///
/// Calls the remote generator, validates every returned set, computes the
/// historical hit tally against the stored draw history, and persists one
/// document per set.
async fn generate_recommendations(
    state: web::Data<AppState>,
    req: web::Json<GenerateRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!(
        "Generating {} set(s) for user {} with model {:?}",
        req.num_sets,
        req.user_id,
        req.model_type
    );

    let envelope = match state.generator.generate(req.model_type, req.num_sets).await {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!("Generator call failed for {}: {}", req.user_id, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Number generation failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    // Each stored set carries the latest draw number known at generation
    // time; the generator reports it, the store is the fallback.
    let latest_draw_number = match envelope.latest_draw_number {
        Some(n) => Some(n),
        None => match cached_latest_draw(&state).await {
            Ok(draw) => Some(draw.draw_number),
            Err(e) => {
                tracing::warn!("Latest draw unavailable from store: {}", e);
                None
            }
        },
    };

    let Some(latest_draw_number) = latest_draw_number else {
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Latest draw number unavailable".to_string(),
            message: "Neither the generator nor the store knows the latest draw".to_string(),
            status_code: 500,
        });
    };

    // Draw history for the hit tally; when the store is unreachable the
    // generator-supplied tally is used instead.
    let history: Option<Vec<DrawResult>> = match cached_draw_history(&state).await {
        Ok(draws) => Some(draws),
        Err(e) => {
            tracing::warn!(
                "Draw history unavailable, falling back to generator tallies: {}",
                e
            );
            None
        }
    };

    let mut stored = Vec::with_capacity(envelope.lotto_numbers.len());
    for generated in envelope.lotto_numbers {
        if let Err(e) = validate_number_set(&generated.numbers) {
            tracing::error!("Generator produced a malformed set: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Generator produced a malformed set".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }

        let mut numbers = generated.numbers;
        numbers.sort_unstable();

        let historical_hit_rates = match &history {
            // Sets are validated above, so evaluation cannot fail on them;
            // a malformed stored draw would, and surfaces as a 500.
            Some(draws) => match evaluate_history(&numbers, draws) {
                Ok(tally) => tally,
                Err(e) => {
                    tracing::error!("Stored draw history is malformed: {}", e);
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "Stored draw history is malformed".to_string(),
                        message: e.to_string(),
                        status_code: 500,
                    });
                }
            },
            None => generated.historical_hit_rates,
        };

        let mut set = RecommendedSet {
            id: None,
            user_id: req.user_id.clone(),
            draw_number: latest_draw_number,
            numbers,
            model_type: req.model_type,
            historical_hit_rates,
            created_at: Some(chrono::Utc::now()),
        };

        match state.appwrite.create_recommendation(&set).await {
            Ok(id) => {
                set.id = Some(id);
                stored.push(set);
            }
            Err(e) => {
                tracing::error!("Failed to store recommendation for {}: {}", req.user_id, e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to store recommendation".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                });
            }
        }
    }

    tracing::info!("Stored {} recommendation(s) for user {}", stored.len(), req.user_id);

    HttpResponse::Ok().json(GenerateResponse {
        recommendations: stored,
        latest_draw_number: Some(latest_draw_number),
    })
}

/// Attach the on-demand outcome against the latest draw to each stored set.
///
/// Outcomes are recomputed per request and never persisted. A malformed
/// stored set gets no outcome rather than failing the whole listing.
fn with_latest_outcomes(
    mut sets: Vec<RecommendedSet>,
    latest: Option<&DrawResult>,
) -> Vec<RecommendationView> {
    // Newest first, the order the dashboard renders
    sets.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    sets.into_iter()
        .map(|set| {
            let latest_match = latest.and_then(|draw| {
                match evaluate(&set.numbers, &draw.winning_numbers, draw.bonus_number) {
                    Ok(outcome) => Some(outcome),
                    Err(e) => {
                        tracing::warn!(
                            "Stored recommendation {:?} cannot be evaluated: {}",
                            set.id,
                            e
                        );
                        None
                    }
                }
            });
            RecommendationView { set, latest_match }
        })
        .collect()
}

/// List recommendations endpoint
///
/// GET /api/v1/recommendations?userId={userId}
async fn list_recommendations(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing userId parameter".to_string(),
                message: "userId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    let sets = match state.appwrite.list_recommendations(user_id).await {
        Ok(sets) => sets,
        Err(e) => {
            tracing::error!("Failed to list recommendations for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list recommendations".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let latest = cached_latest_draw(&state).await.ok();

    HttpResponse::Ok().json(RecommendationsResponse {
        recommendations: with_latest_outcomes(sets, latest.as_ref()),
        latest_draw_number: latest.map(|d| d.draw_number),
    })
}

/// List all recommendations endpoint (administrative view)
///
/// GET /api/v1/recommendations/all
///
/// Access control for this path lives upstream, as it does for draw input.
async fn list_all_recommendations(state: web::Data<AppState>) -> impl Responder {
    let sets = match state.appwrite.list_all_recommendations().await {
        Ok(sets) => sets,
        Err(e) => {
            tracing::error!("Failed to list all recommendations: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list recommendations".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let latest = cached_latest_draw(&state).await.ok();

    HttpResponse::Ok().json(RecommendationsResponse {
        recommendations: with_latest_outcomes(sets, latest.as_ref()),
        latest_draw_number: latest.map(|d| d.draw_number),
    })
}

/// Delete recommendation endpoint
///
/// DELETE /api/v1/recommendations/{id}?userId={userId}
async fn delete_recommendation(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let id = path.into_inner();

    let user_id = match query.get("userId") {
        Some(user_id) => user_id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing userId parameter".to_string(),
                message: "userId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.appwrite.delete_recommendation(&id, user_id).await {
        Ok(()) => HttpResponse::Ok().json(DeleteResponse { success: true, id }),
        Err(AppwriteError::NotFound(msg)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Recommendation not found".to_string(),
            message: msg,
            status_code: 404,
        }),
        Err(AppwriteError::Unauthorized(msg)) => HttpResponse::Forbidden().json(ErrorResponse {
            error: "Not the owner".to_string(),
            message: msg,
            status_code: 403,
        }),
        Err(e) => {
            tracing::error!("Failed to delete recommendation {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to delete recommendation".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModelType, PrizeTier};

    fn stored_set(id: &str, numbers: [u8; 6], minutes_ago: i64) -> RecommendedSet {
        RecommendedSet {
            id: Some(id.to_string()),
            user_id: "alice".to_string(),
            draw_number: 1175,
            numbers: numbers.to_vec(),
            model_type: ModelType::Statistical,
            historical_hit_rates: Default::default(),
            created_at: Some(chrono::Utc::now() - chrono::Duration::minutes(minutes_ago)),
        }
    }

    #[test]
    fn test_with_latest_outcomes_orders_newest_first() {
        let latest = DrawResult {
            draw_number: 1175,
            winning_numbers: vec![1, 2, 3, 4, 5, 6],
            bonus_number: 7,
            prizes: Default::default(),
            draw_date: None,
        };

        let sets = vec![
            stored_set("old", [1, 2, 3, 40, 41, 42], 60),
            stored_set("new", [10, 11, 12, 13, 14, 15], 1),
        ];

        let views = with_latest_outcomes(sets, Some(&latest));

        assert_eq!(views[0].set.id.as_deref(), Some("new"));
        assert_eq!(views[1].set.id.as_deref(), Some("old"));
        assert_eq!(views[0].latest_match.as_ref().unwrap().tier, None);
        assert_eq!(
            views[1].latest_match.as_ref().unwrap().tier,
            Some(PrizeTier::Fifth)
        );
    }

    #[test]
    fn test_with_latest_outcomes_without_latest_draw() {
        let views = with_latest_outcomes(vec![stored_set("a", [1, 2, 3, 4, 5, 6], 0)], None);
        assert!(views[0].latest_match.is_none());
    }
}
