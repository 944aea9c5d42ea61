use actix_web::{HttpResponse, web};
use serde_json::Value;

use crate::forms::decode;
use crate::forms::employee::EmployeePayload;
use crate::forms::query::EmployeeListParams;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, employee as service};

pub async fn list_employees(
    repo: web::Data<DieselRepository>,
    params: web::Query<EmployeeListParams>,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let params = params.into_inner();
    let page = web::block(move || service::list_employees(&repo, &params)).await??;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn create_employee(
    repo: web::Data<DieselRepository>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let payload: EmployeePayload = decode(body.into_inner())?;
    let employee = web::block(move || service::create_employee(&repo, &payload)).await??;
    Ok(HttpResponse::Created().json(employee))
}

pub async fn show_employee(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let id = id.into_inner();
    let employee = web::block(move || service::get_employee(&repo, &id)).await??;
    Ok(HttpResponse::Ok().json(employee))
}

async fn update(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    body: web::Json<Value>,
    partial: bool,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let id = id.into_inner();
    let payload: EmployeePayload = decode(body.into_inner())?;
    let employee =
        web::block(move || service::update_employee(&repo, &id, &payload, partial)).await??;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn replace_employee(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    update(repo, id, body, false).await
}

pub async fn patch_employee(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    update(repo, id, body, true).await
}

pub async fn delete_employee(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let id = id.into_inner();
    web::block(move || service::delete_employee(&repo, &id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
