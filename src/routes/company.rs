use actix_web::{HttpResponse, web};
use serde_json::Value;

use crate::forms::decode;
use crate::forms::company::CompanyPayload;
use crate::forms::query::{CompanyDetailParams, CompanyListParams, wants_employees};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, company as service};

pub async fn list_companies(
    repo: web::Data<DieselRepository>,
    params: web::Query<CompanyListParams>,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let params = params.into_inner();
    let page = web::block(move || service::list_companies(&repo, &params)).await??;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn create_company(
    repo: web::Data<DieselRepository>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let payload: CompanyPayload = decode(body.into_inner())?;
    let company = web::block(move || service::create_company(&repo, &payload)).await??;
    Ok(HttpResponse::Created().json(company))
}

pub async fn show_company(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    params: web::Query<CompanyDetailParams>,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let id = id.into_inner();
    let with_employees = wants_employees(params.with_employees.as_deref());
    let company = web::block(move || service::get_company(&repo, &id, with_employees)).await??;
    Ok(HttpResponse::Ok().json(company))
}

pub async fn update_company(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let id = id.into_inner();
    let payload: CompanyPayload = decode(body.into_inner())?;
    let company = web::block(move || service::update_company(&repo, &id, &payload)).await??;
    Ok(HttpResponse::Ok().json(company))
}

pub async fn delete_company(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let repo = repo.get_ref().clone();
    let id = id.into_inner();
    web::block(move || service::delete_company(&repo, &id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
