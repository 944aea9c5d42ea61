use actix_web::{HttpResponse, web};
use serde_json::Value;

use crate::dto::MessageBody;
use crate::repository::DieselRepository;
use crate::services::bulk::{self as service, BulkOutcome};
use crate::services::ServiceError;

fn respond(outcome: BulkOutcome) -> HttpResponse {
    let body = MessageBody::new(outcome.message());
    match outcome {
        BulkOutcome::Created(_) => HttpResponse::Created().json(body),
        BulkOutcome::Deleted(_) | BulkOutcome::Updated(_) => HttpResponse::Ok().json(body),
    }
}

/// `{"action": "CREATE" | "DELETE", "employees": [...]}`
pub async fn bulk_action(
    repo: web::Data<DieselRepository>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let body = body.into_inner();
    let outcome = web::block(move || service::run_action(&repo, body)).await??;
    Ok(respond(outcome))
}

async fn update(
    repo: web::Data<DieselRepository>,
    body: web::Json<Value>,
    partial: bool,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let body = body.into_inner();
    let outcome = web::block(move || service::update_batch(&repo, body, partial)).await??;
    Ok(respond(outcome))
}

pub async fn bulk_replace(
    repo: web::Data<DieselRepository>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    update(repo, body, false).await
}

pub async fn bulk_patch(
    repo: web::Data<DieselRepository>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    update(repo, body, true).await
}
