use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::domain::types::PostId;
use crate::forms::posts::{CreatePostPayload, PostForm, UpdatePostPayload};
use crate::repository::DieselRepository;
use crate::routes::{infrastructure_response, not_found_response, rejection_response};
use crate::services::Envelope;
use crate::services::posts::{
    create_post as create_post_service, delete_post as delete_post_service,
    list_posts as list_posts_service, show_post as show_post_service,
    update_post as update_post_service,
};

fn post_id(raw: i32) -> Result<PostId, HttpResponse> {
    PostId::new(raw).map_err(|_| not_found_response(format!("post {raw} not found")))
}

#[get("/posts")]
pub async fn list_posts(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_posts_service(repo.get_ref()) {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(err) => infrastructure_response(err),
    }
}

#[get("/posts/{post_id}")]
pub async fn show_post(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let post_id = match post_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match show_post_service(post_id, repo.get_ref()) {
        Ok(Some(post)) => HttpResponse::Ok().json(post),
        Ok(None) => not_found_response(format!("post {post_id} not found")),
        Err(err) => infrastructure_response(err),
    }
}

#[post("/posts")]
pub async fn create_post(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PostForm>,
) -> impl Responder {
    let payload: CreatePostPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return rejection_response(e.into()),
    };

    match create_post_service(payload, repo.get_ref()) {
        Ok(Envelope::Success(id)) => {
            HttpResponse::Created().json(json!({"status": "success", "post_id": id}))
        }
        Ok(Envelope::Error(rejection)) => rejection_response(rejection),
        Err(err) => infrastructure_response(err),
    }
}

#[put("/posts/{post_id}")]
pub async fn update_post(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PostForm>,
) -> impl Responder {
    let post_id = match post_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: UpdatePostPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return rejection_response(e.into()),
    };

    match update_post_service(post_id, payload, repo.get_ref()) {
        Ok(Envelope::Success(post)) => {
            HttpResponse::Ok().json(json!({"status": "success", "post": post}))
        }
        Ok(Envelope::Error(rejection)) => rejection_response(rejection),
        Err(err) => infrastructure_response(err),
    }
}

#[delete("/posts/{post_id}")]
pub async fn delete_post(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let post_id = match post_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match delete_post_service(post_id, repo.get_ref()) {
        Ok(Envelope::Success(())) => HttpResponse::Ok().json(json!({"status": "success"})),
        Ok(Envelope::Error(rejection)) => rejection_response(rejection),
        Err(err) => infrastructure_response(err),
    }
}
