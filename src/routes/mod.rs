//! HTTP surface of the service.

use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::services::ServiceError;

pub mod bulk;
pub mod company;
pub mod employee;
pub mod errors;

/// Answers any method a resource does not route.
async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    Err(ServiceError::MethodNotAllowed(req.method().to_string()))
}

fn bad_request<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    let response = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
    InternalError::from_response(err, response).into()
}

/// Registers every `/api` resource. Shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err)))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/company/")
                        .route(web::get().to(company::list_companies))
                        .route(web::post().to(company::create_company))
                        .default_service(web::to(method_not_allowed)),
                )
                .service(
                    web::resource("/company/{id}/")
                        .route(web::get().to(company::show_company))
                        .route(web::patch().to(company::update_company))
                        .route(web::delete().to(company::delete_company))
                        .default_service(web::to(method_not_allowed)),
                )
                // Registered before `/employee/{id}/` so "bulk" is not taken as an id.
                .service(
                    web::resource("/employee/bulk/")
                        .route(web::post().to(bulk::bulk_action))
                        .route(web::put().to(bulk::bulk_replace))
                        .route(web::patch().to(bulk::bulk_patch))
                        .default_service(web::to(method_not_allowed)),
                )
                .service(
                    web::resource("/employee/")
                        .route(web::get().to(employee::list_employees))
                        .route(web::post().to(employee::create_employee))
                        .default_service(web::to(method_not_allowed)),
                )
                .service(
                    web::resource("/employee/{id}/")
                        .route(web::get().to(employee::show_employee))
                        .route(web::put().to(employee::replace_employee))
                        .route(web::patch().to(employee::patch_employee))
                        .route(web::delete().to(employee::delete_employee))
                        .default_service(web::to(method_not_allowed)),
                ),
        );
}
