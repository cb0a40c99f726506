use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::domain::types::TagId;
use crate::forms::tags::{TagForm, TagFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{infrastructure_response, not_found_response, rejection_response};
use crate::services::Envelope;
use crate::services::tags::{
    create_tag as create_tag_service, delete_tag as delete_tag_service,
    list_tags as list_tags_service, show_tag as show_tag_service,
    update_tag as update_tag_service,
};

fn tag_id(raw: i32) -> Result<TagId, HttpResponse> {
    TagId::new(raw).map_err(|_| not_found_response(format!("tag {raw} not found")))
}

#[get("/tags")]
pub async fn list_tags(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_tags_service(repo.get_ref()) {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(err) => infrastructure_response(err),
    }
}

#[get("/tags/{tag_id}")]
pub async fn show_tag(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let tag_id = match tag_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match show_tag_service(tag_id, repo.get_ref()) {
        Ok(Some(tag)) => HttpResponse::Ok().json(tag),
        Ok(None) => not_found_response(format!("tag {tag_id} not found")),
        Err(err) => infrastructure_response(err),
    }
}

#[post("/tags")]
pub async fn create_tag(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<TagForm>,
) -> impl Responder {
    let payload: TagFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return rejection_response(e.into()),
    };

    match create_tag_service(payload, repo.get_ref()) {
        Ok(Envelope::Success(id)) => {
            HttpResponse::Created().json(json!({"status": "success", "tag_id": id}))
        }
        Ok(Envelope::Error(rejection)) => rejection_response(rejection),
        Err(err) => infrastructure_response(err),
    }
}

#[put("/tags/{tag_id}")]
pub async fn update_tag(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<TagForm>,
) -> impl Responder {
    let tag_id = match tag_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: TagFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return rejection_response(e.into()),
    };

    match update_tag_service(tag_id, payload, repo.get_ref()) {
        Ok(Envelope::Success(tag)) => {
            HttpResponse::Ok().json(json!({"status": "success", "tag": tag}))
        }
        Ok(Envelope::Error(rejection)) => rejection_response(rejection),
        Err(err) => infrastructure_response(err),
    }
}

#[delete("/tags/{tag_id}")]
pub async fn delete_tag(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let tag_id = match tag_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match delete_tag_service(tag_id, repo.get_ref()) {
        Ok(Envelope::Success(())) => HttpResponse::Ok().json(json!({"status": "success"})),
        Ok(Envelope::Error(rejection)) => rejection_response(rejection),
        Err(err) => infrastructure_response(err),
    }
}
