use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::infrastructure_response;
use crate::services::catalogs::{
    list_languages as list_languages_service, list_post_statuses as list_post_statuses_service,
};

#[get("/languages")]
pub async fn list_languages(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_languages_service(repo.get_ref()) {
        Ok(languages) => HttpResponse::Ok().json(languages),
        Err(err) => infrastructure_response(err),
    }
}

#[get("/post-statuses")]
pub async fn list_post_statuses(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_post_statuses_service(repo.get_ref()) {
        Ok(statuses) => HttpResponse::Ok().json(statuses),
        Err(err) => infrastructure_response(err),
    }
}
