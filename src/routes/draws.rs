use crate::core::{next_draw_date, next_draw_number, validate_draw_input};
use crate::models::{
    DrawResult, ErrorResponse, HealthResponse, RecordDrawRequest, RecordDrawResponse,
    ScheduleResponse,
};
use crate::routes::AppState;
use crate::services::{AppwriteError, CacheKey};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure all draw-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/draws/schedule", web::get().to(get_schedule))
        .route("/draws/latest", web::get().to(get_latest_draw))
        .route("/draws", web::post().to(record_draw));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Fetch the latest draw, reading through the cache.
pub(crate) async fn cached_latest_draw(state: &AppState) -> Result<DrawResult, AppwriteError> {
    let key = CacheKey::latest_draw();
    if let Ok(draw) = state.cache.get::<DrawResult>(&key).await {
        return Ok(draw);
    }

    let draw = state.appwrite.latest_draw().await?;
    if let Err(e) = state.cache.set(&key, &draw).await {
        tracing::warn!("Failed to cache latest draw: {}", e);
    }
    Ok(draw)
}

/// Fetch the full draw history, reading through the cache.
pub(crate) async fn cached_draw_history(state: &AppState) -> Result<Vec<DrawResult>, AppwriteError> {
    let key = CacheKey::draw_history();
    if let Ok(draws) = state.cache.get::<Vec<DrawResult>>(&key).await {
        return Ok(draws);
    }

    let draws = state.appwrite.list_draws().await?;
    if let Err(e) = state.cache.set(&key, &draws).await {
        tracing::warn!("Failed to cache draw history: {}", e);
    }
    Ok(draws)
}

/// Draw schedule endpoint
///
/// GET /api/v1/draws/schedule
///
/// Always returns the next draw date; the draw-number fields are null when
/// the store has no recorded draws (the client renders the date either way).
async fn get_schedule(state: web::Data<AppState>) -> impl Responder {
    let today = chrono::Utc::now().date_naive();
    let next_date = next_draw_date(today);

    let latest = match cached_latest_draw(&state).await {
        Ok(draw) => Some(draw.draw_number),
        Err(e) => {
            tracing::warn!("Latest draw unavailable for schedule: {}", e);
            None
        }
    };

    let next_number = latest.and_then(|n| match next_draw_number(n) {
        Ok(next) => Some(next),
        Err(e) => {
            tracing::warn!("Stored draw number {} is unusable: {}", n, e);
            None
        }
    });

    HttpResponse::Ok().json(ScheduleResponse {
        next_draw_date: next_date,
        latest_draw_number: latest,
        next_draw_number: next_number,
    })
}

/// Latest draw endpoint
///
/// GET /api/v1/draws/latest
async fn get_latest_draw(state: web::Data<AppState>) -> impl Responder {
    match cached_latest_draw(&state).await {
        Ok(draw) => HttpResponse::Ok().json(draw),
        Err(AppwriteError::NotFound(msg)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "No draws recorded".to_string(),
            message: msg,
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch latest draw: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch latest draw".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Record draw endpoint (administrative input path)
///
/// POST /api/v1/draws
///
/// Request body:
/// ```json
/// {
///   "drawNumber": 1176,
///   "winning_numbers": [7, 9, 11, 21, 30, 35],
///   "bonus_number": 29,
///   "prizes": {"1st": 49959102, "2nd": 1258523}
/// }
/// ```
async fn record_draw(
    state: web::Data<AppState>,
    req: web::Json<RecordDrawRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Invariant: six distinct in-range winning numbers, bonus in range and
    // disjoint from them.
    if let Err(e) = validate_draw_input(&req.winning_numbers, req.bonus_number) {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid draw result".to_string(),
            message: e.to_string(),
            status_code: 400,
        });
    }

    // Winning numbers are stored ascending for document consistency.
    let mut winning_numbers = req.winning_numbers.clone();
    winning_numbers.sort_unstable();

    let draw = DrawResult {
        draw_number: req.draw_number,
        winning_numbers,
        bonus_number: req.bonus_number,
        prizes: req.prizes.clone(),
        draw_date: Some(chrono::Utc::now()),
    };

    if let Err(e) = state.appwrite.record_draw(&draw).await {
        tracing::error!("Failed to record draw {}: {}", draw.draw_number, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to record draw".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    // Invalidate both draw caches so readers see the new draw
    for key in [CacheKey::latest_draw(), CacheKey::draw_history()] {
        if let Err(e) = state.cache.delete(&key).await {
            tracing::warn!("Failed to invalidate cache key {}: {}", key, e);
        }
    }

    tracing::info!("Recorded draw {}", draw.draw_number);

    HttpResponse::Ok().json(RecordDrawResponse {
        success: true,
        draw_number: draw.draw_number,
    })
}

#[cfg(test)]
mod tests {
    use crate::models::HealthResponse;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
