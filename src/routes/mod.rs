use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::services::{InfrastructureError, Rejection, RejectionKind};

pub mod catalogs;
pub mod categories;
pub mod posts;
pub mod tags;

/// Mount every endpoint under `/v1`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .service(catalogs::list_languages)
            .service(catalogs::list_post_statuses)
            .service(
                web::scope("/admin")
                    .service(categories::list_categories)
                    .service(categories::show_category)
                    .service(categories::create_category)
                    .service(categories::update_category)
                    .service(categories::delete_category)
                    .service(posts::list_posts)
                    .service(posts::show_post)
                    .service(posts::create_post)
                    .service(posts::update_post)
                    .service(posts::delete_post)
                    .service(tags::list_tags)
                    .service(tags::show_tag)
                    .service(tags::create_tag)
                    .service(tags::update_tag)
                    .service(tags::delete_tag),
            ),
    );
}

/// Malformed JSON bodies are answered with `400 {code, message}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        let response = HttpResponse::BadRequest().json(json!({"code": 400, "message": message}));
        InternalError::from_response(err, response).into()
    })
}

/// `{"status": "error", "error": {field: message}}` with a status per kind.
pub fn rejection_response(rejection: Rejection) -> HttpResponse {
    let status = match rejection.kind {
        RejectionKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        RejectionKind::NotFound => StatusCode::NOT_FOUND,
        RejectionKind::Conflict => StatusCode::CONFLICT,
    };
    HttpResponse::build(status).json(json!({"status": "error", "error": rejection.fields}))
}

pub fn not_found_response(message: String) -> HttpResponse {
    rejection_response(Rejection::not_found(message))
}

/// Infrastructure failures are already logged by the service layer.
pub fn infrastructure_response(_err: InfrastructureError) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "code": 500,
        "message": "Internal server error",
    }))
}
