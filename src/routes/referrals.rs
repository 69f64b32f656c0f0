use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::Settings;
use crate::core::ReferralEngine;
use crate::error::ReferralError;
use crate::models::{
    ErrorResponse, EvaluateRequest, HealthResponse, ProfileKind, RecommendRequest,
    RecommendResponse, ScoreRequest,
};
use crate::services::{RecommendationCache, ReferralRepository, StoreError};

/// One engine per scoring profile, built once at startup
#[derive(Debug, Clone)]
pub struct Engines {
    pub default_profile: ProfileKind,
    thorough: ReferralEngine,
    quick: ReferralEngine,
}

impl Engines {
    pub fn from_settings(settings: &Settings) -> Result<Self, ReferralError> {
        Ok(Self {
            default_profile: settings.scoring.profile,
            thorough: ReferralEngine::new(settings.engine_config(ProfileKind::Thorough)?)?,
            quick: ReferralEngine::new(settings.engine_config(ProfileKind::Quick)?)?,
        })
    }

    /// Engine for the requested profile, or the configured default
    pub fn get(&self, profile: Option<ProfileKind>) -> &ReferralEngine {
        match profile.unwrap_or(self.default_profile) {
            ProfileKind::Thorough => &self.thorough,
            ProfileKind::Quick => &self.quick,
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: ReferralRepository,
    pub cache: RecommendationCache,
    pub engines: Arc<Engines>,
}

/// Configure all referral-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/compatibility/score", web::post().to(score_pair))
        .route("/referrals/evaluate", web::post().to(evaluate))
        .route("/referrals/recommend", web::post().to(recommend))
        .route("/referrals/{seeker_id}", web::get().to(cached_recommendations));
}

fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}

fn invalid_records(err: ReferralError) -> HttpResponse {
    tracing::info!("Rejected request: {}", err);
    error_response(StatusCode::UNPROCESSABLE_ENTITY, "Invalid records", err.to_string())
}

fn store_failure(context: &str, err: StoreError) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, context, err.to_string())
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store = state.repository.store();
    let status = match store.health_check().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("Record store health check failed: {}", e);
            "degraded"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store.backend().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score one pair
///
/// POST /api/v1/compatibility/score
///
/// Request body:
/// ```json
/// {
///   "seeker": { "id": "s1", "skills": ["python"] },
///   "candidate": { "id": "a1", "current_company": "Google" },
///   "profile": "quick|thorough"
/// }
/// ```
async fn score_pair(state: web::Data<AppState>, req: web::Json<ScoreRequest>) -> impl Responder {
    match state.engines.get(req.profile).score(&req.seeker, &req.candidate) {
        Ok(score) => HttpResponse::Ok().json(score),
        Err(e) => invalid_records(e),
    }
}

/// Run the pipeline over records supplied in the request; nothing is stored
///
/// POST /api/v1/referrals/evaluate
async fn evaluate(state: web::Data<AppState>, req: web::Json<EvaluateRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.engines.get(req.profile).recommend(&req.seeker, &req.candidates) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => invalid_records(e),
    }
}

/// Recommend referral paths for a stored seeker
///
/// POST /api/v1/referrals/recommend
///
/// Request body:
/// ```json
/// {
///   "seekerId": "string",
///   "profile": "quick|thorough",
///   "persist": true
/// }
/// ```
async fn recommend(state: web::Data<AppState>, req: web::Json<RecommendRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let seeker_id = &req.seeker_id;
    let engine = state.engines.get(req.profile);
    let profile = engine.profile_kind();

    tracing::info!("Recommending referral paths for seeker {} ({})", seeker_id, profile);

    let seeker = match state.repository.load_seeker(seeker_id).await {
        Ok(seeker) => seeker,
        Err(StoreError::NotFound(what)) => {
            return error_response(
                StatusCode::NOT_FOUND,
                "Seeker not found",
                format!("No record for {}", what),
            );
        }
        Err(e) => return store_failure("Failed to load seeker", e),
    };

    let candidates = match state.repository.load_candidates().await {
        Ok(candidates) => candidates,
        Err(e) => return store_failure("Failed to load candidates", e),
    };

    let result = match engine.recommend(&seeker, &candidates) {
        Ok(result) => result,
        Err(e) => return invalid_records(e),
    };

    let persisted_id = if req.persist {
        match state
            .repository
            .save_recommendations(seeker_id, profile, &result)
            .await
        {
            Ok(id) => Some(id),
            Err(e) => return store_failure("Failed to save recommendations", e),
        }
    } else {
        None
    };

    let response = RecommendResponse {
        seeker_id: seeker_id.clone(),
        profile,
        result,
        persisted_id,
    };
    state.cache.insert(response.clone()).await;

    HttpResponse::Ok().json(response)
}

/// Last recommendation computed for a seeker
///
/// GET /api/v1/referrals/{seekerId}
async fn cached_recommendations(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let seeker_id = path.into_inner();

    match state
        .cache
        .latest(&seeker_id, state.engines.default_profile)
        .await
    {
        Some(response) => HttpResponse::Ok().json(response),
        None => error_response(
            StatusCode::NOT_FOUND,
            "No recommendations",
            format!("No recent recommendations for seeker '{}'", seeker_id),
        ),
    }
}
