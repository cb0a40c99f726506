use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::domain::types::CategoryId;
use crate::forms::categories::{CategoryForm, CategoryFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{infrastructure_response, not_found_response, rejection_response};
use crate::services::Envelope;
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    list_categories as list_categories_service, show_category as show_category_service,
    update_category as update_category_service,
};

fn category_id(raw: i32) -> Result<CategoryId, HttpResponse> {
    CategoryId::new(raw).map_err(|_| not_found_response(format!("category {raw} not found")))
}

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_categories_service(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => infrastructure_response(err),
    }
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = match category_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match show_category_service(category_id, repo.get_ref()) {
        Ok(Some(category)) => HttpResponse::Ok().json(category),
        Ok(None) => not_found_response(format!("category {category_id} not found")),
        Err(err) => infrastructure_response(err),
    }
}

#[post("/categories")]
pub async fn create_category(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let payload: CategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return rejection_response(e.into()),
    };

    match create_category_service(payload, repo.get_ref()) {
        Ok(Envelope::Success(id)) => {
            HttpResponse::Created().json(json!({"status": "success", "category_id": id}))
        }
        Ok(Envelope::Error(rejection)) => rejection_response(rejection),
        Err(err) => infrastructure_response(err),
    }
}

#[put("/categories/{category_id}")]
pub async fn update_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let category_id = match category_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: CategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return rejection_response(e.into()),
    };

    match update_category_service(category_id, payload, repo.get_ref()) {
        Ok(Envelope::Success(category)) => {
            HttpResponse::Ok().json(json!({"status": "success", "category": category}))
        }
        Ok(Envelope::Error(rejection)) => rejection_response(rejection),
        Err(err) => infrastructure_response(err),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = match category_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match delete_category_service(category_id, repo.get_ref()) {
        Ok(Envelope::Success(())) => HttpResponse::Ok().json(json!({"status": "success"})),
        Ok(Envelope::Error(rejection)) => rejection_response(rejection),
        Err(err) => infrastructure_response(err),
    }
}
