use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::models::{
    AdRequest, CreateLeadRequest, CreatePropertyRequest, EmailRequest, ErrorResponse,
    HealthResponse, MatchRequest, MatchResponse, ReelRequest, UpdateLeadStageRequest,
    UpdatePropertyRequest, ValuationRequest,
};
use crate::services::{AiDriver, EngineError, InMemoryStore, LatencySimulator, StoreError};

/// Application state shared across all handlers.
///
/// The driver is an explicit dependency chosen at startup; handlers never
/// reach for a global instance.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub driver: Arc<dyn AiDriver>,
    pub latency: LatencySimulator,
}

/// Configure all engine routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/properties", web::get().to(list_properties))
        .route("/properties", web::post().to(create_property))
        .route("/properties/{id}", web::get().to(get_property))
        .route("/properties/{id}", web::patch().to(update_property))
        .route("/leads", web::get().to(list_leads))
        .route("/leads", web::post().to(create_lead))
        .route("/leads/{id}", web::get().to(get_lead))
        .route("/leads/{id}/stage", web::post().to(update_lead_stage))
        .route("/match", web::post().to(match_lead))
        .route("/valuation", web::post().to(estimate_price))
        .route("/copy/ad", web::post().to(write_ad))
        .route("/copy/email", web::post().to(write_email))
        .route("/copy/reel", web::post().to(write_reel_script));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "validation_failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn store_failure(err: StoreError) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "not_found".to_string(),
        message: err.to_string(),
        status_code: 404,
    })
}

fn engine_failure(err: EngineError) -> HttpResponse {
    tracing::error!("Engine operation failed: {}", err);
    HttpResponse::BadGateway().json(ErrorResponse {
        error: "engine_failure".to_string(),
        message: err.to_string(),
        status_code: 502,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

async fn list_properties(state: web::Data<AppState>) -> impl Responder {
    state.latency.pause().await;
    HttpResponse::Ok().json(state.store.list_properties().await)
}

async fn create_property(
    state: web::Data<AppState>,
    req: web::Json<CreatePropertyRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    state.latency.pause().await;

    let property = state.store.insert_property(req.into_inner().into_property()).await;
    tracing::info!("Created property {} ({})", property.id, property.reference);
    HttpResponse::Created().json(property)
}

async fn get_property(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    state.latency.pause().await;
    match state.store.get_property(&path).await {
        Ok(property) => HttpResponse::Ok().json(property),
        Err(err) => store_failure(err),
    }
}

async fn update_property(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdatePropertyRequest>,
) -> impl Responder {
    state.latency.pause().await;
    match state
        .store
        .update_property(&path, req.status, req.price)
        .await
    {
        Ok(property) => {
            tracing::info!("Updated property {} (status {:?})", property.id, property.status);
            HttpResponse::Ok().json(property)
        }
        Err(err) => store_failure(err),
    }
}

async fn list_leads(state: web::Data<AppState>) -> impl Responder {
    state.latency.pause().await;
    HttpResponse::Ok().json(state.store.list_leads().await)
}

async fn create_lead(
    state: web::Data<AppState>,
    req: web::Json<CreateLeadRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    state.latency.pause().await;

    let lead = state.store.insert_lead(req.into_inner().into_lead()).await;
    tracing::info!("Created lead {} ({})", lead.id, lead.name);
    HttpResponse::Created().json(lead)
}

async fn get_lead(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    state.latency.pause().await;
    match state.store.get_lead(&path).await {
        Ok(lead) => HttpResponse::Ok().json(lead),
        Err(err) => store_failure(err),
    }
}

async fn update_lead_stage(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateLeadStageRequest>,
) -> impl Responder {
    state.latency.pause().await;
    let req = req.into_inner();
    match state
        .store
        .update_lead_stage(&path, req.stage, req.lost_reason)
        .await
    {
        Ok(lead) => HttpResponse::Ok().json(lead),
        Err(err) => store_failure(err),
    }
}

/// Match endpoint
///
/// POST /api/v1/match
///
/// Looks the lead up by id and scores the full catalog against it; only
/// active listings come back, best score first.
async fn match_lead(state: web::Data<AppState>, req: web::Json<MatchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return validation_failed(errors);
    }
    state.latency.pause().await;

    let lead = match state.store.get_lead(&req.lead_id).await {
        Ok(lead) => lead,
        Err(err) => return store_failure(err),
    };
    let properties = state.store.list_properties().await;
    let total_active = properties.iter().filter(|p| p.is_active()).count();

    tracing::info!(
        "Matching lead {} against {} listings ({} active)",
        lead.id,
        properties.len(),
        total_active
    );

    match state.driver.match_lead(&lead, &properties).await {
        Ok(results) => {
            tracing::info!("Returning {} match results for lead {}", results.len(), lead.id);
            HttpResponse::Ok().json(MatchResponse {
                results,
                total_active,
            })
        }
        Err(err) => engine_failure(err),
    }
}

/// Valuation endpoint
///
/// POST /api/v1/valuation
async fn estimate_price(
    state: web::Data<AppState>,
    req: web::Json<ValuationRequest>,
) -> impl Responder {
    // Negative/zero area is a form-schema concern upstream; reject it at
    // the boundary rather than letting the estimator produce nonsense.
    if req.features.area_sqm <= 0.0 {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: "features.areaSqm must be positive".to_string(),
            status_code: 400,
        });
    }
    state.latency.pause().await;

    let input = req.into_inner().into_input();
    tracing::info!(
        "Estimating price for {} m² in {}",
        input.features.area_sqm,
        input.address.city
    );

    match state.driver.estimate_price(&input).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => engine_failure(err),
    }
}

/// Ad copy endpoint
///
/// POST /api/v1/copy/ad
async fn write_ad(state: web::Data<AppState>, req: web::Json<AdRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    state.latency.pause().await;

    let property = match state.store.get_property(&req.property_id).await {
        Ok(property) => property,
        Err(err) => return store_failure(err),
    };

    match state.driver.write_ad(&property, req.style).await {
        Ok(text) => HttpResponse::Ok().json(crate::models::CopyResponse { text }),
        Err(err) => engine_failure(err),
    }
}

/// Email copy endpoint
///
/// POST /api/v1/copy/email
async fn write_email(state: web::Data<AppState>, req: web::Json<EmailRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    state.latency.pause().await;

    let context = req.into_inner().into_context();
    match state.driver.write_email(&context).await {
        Ok(text) => HttpResponse::Ok().json(crate::models::CopyResponse { text }),
        Err(err) => engine_failure(err),
    }
}

/// Reel script endpoint
///
/// POST /api/v1/copy/reel
async fn write_reel_script(
    state: web::Data<AppState>,
    req: web::Json<ReelRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }
    state.latency.pause().await;

    let property = match state.store.get_property(&req.property_id).await {
        Ok(property) => property,
        Err(err) => return store_failure(err),
    };

    match state
        .driver
        .write_reel_script(&property, req.duration_seconds)
        .await
    {
        Ok(text) => HttpResponse::Ok().json(crate::models::CopyResponse { text }),
        Err(err) => engine_failure(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
