use std::sync::Arc;
use std::time::Instant;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, Responder, ResponseError};
use prometheus::{Encoder, TextEncoder};

use crate::domain::customer::{CustomerError, CustomerPatch, CustomerRegistration, CustomerService};
use crate::metrics::Metrics;

// ============================================================================
// HTTP Surface - REST endpoints over the customer service
// ============================================================================
//
// Thin glue: deserialize the request, call the service, map the domain
// result onto a status code and a JSON body. No business rules live here.
//
// ============================================================================

pub struct AppState {
    pub service: CustomerService,
    pub metrics: Arc<Metrics>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/customers", web::get().to(get_customers))
            .route("/customers", web::post().to(add_customer))
            .route("/customers/{id}", web::get().to(get_customer_by_id))
            .route("/customers/{id}", web::put().to(update_customer))
            .route("/customers/{id}", web::delete().to(delete_customer)),
    )
    .route("/health", web::get().to(health_handler))
    .route("/metrics", web::get().to(metrics_handler));
}

/// Start the HTTP server and block until it shuts down.
pub async fn run_server(state: AppState, bind_addr: &str, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(state);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((bind_addr, port))?
        .run()
        .await
}

impl ResponseError for CustomerError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
            CustomerError::DuplicateEmail => StatusCode::CONFLICT,
            CustomerError::NoChanges => StatusCode::BAD_REQUEST,
            CustomerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Storage failures are logged, not leaked.
            CustomerError::Store(err) => {
                tracing::error!(error = %err, "storage failure");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

async fn get_customers(state: web::Data<AppState>) -> Result<HttpResponse, CustomerError> {
    let started = Instant::now();
    let result = state.service.get_all_customers().await;
    state
        .metrics
        .observe_request("get_all", started.elapsed(), result.is_ok());

    Ok(HttpResponse::Ok().json(result?))
}

async fn get_customer_by_id(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, CustomerError> {
    let started = Instant::now();
    let result = state.service.get_customer(*id).await;
    state
        .metrics
        .observe_request("get", started.elapsed(), result.is_ok());

    Ok(HttpResponse::Ok().json(result?))
}

async fn add_customer(
    state: web::Data<AppState>,
    request: web::Json<CustomerRegistration>,
) -> Result<HttpResponse, CustomerError> {
    let started = Instant::now();
    let result = state.service.add_customer(request.into_inner()).await;
    state
        .metrics
        .observe_request("add", started.elapsed(), result.is_ok());

    Ok(HttpResponse::Created().json(result?))
}

async fn update_customer(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    patch: web::Json<CustomerPatch>,
) -> Result<HttpResponse, CustomerError> {
    let started = Instant::now();
    let result = state.service.update_customer(*id, patch.into_inner()).await;
    state
        .metrics
        .observe_request("update", started.elapsed(), result.is_ok());

    Ok(HttpResponse::Ok().json(result?))
}

async fn delete_customer(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, CustomerError> {
    let started = Instant::now();
    let result = state.service.delete_customer(*id).await;
    state
        .metrics
        .observe_request("delete", started.elapsed(), result.is_ok());

    result?;
    Ok(HttpResponse::NoContent().finish())
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "customer-service"
    }))
}

async fn metrics_handler(state: web::Data<AppState>) -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics.registry().gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %err, "failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

// ============================================================================
// Unit Tests
// ============================================================================
