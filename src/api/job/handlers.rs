use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use super::service::JobService;
use crate::auth::Access;

pub async fn list_jobs(_access: Access, jobs: web::Data<JobService>) -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(jobs.list_jobs().await?))
}

pub async fn get_job(
    _access: Access,
    jobs: web::Data<JobService>,
    id: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(jobs.get_job(&id).await?))
}

pub async fn list_posted_jobs(
    access: Access,
    jobs: web::Data<JobService>,
) -> actix_web::Result<HttpResponse> {
    let owner = access.owner()?;
    Ok(HttpResponse::Ok().json(jobs.list_owned_jobs(owner).await?))
}

pub async fn create_job(
    _access: Access,
    jobs: web::Data<JobService>,
    body: web::Json<Map<String, Value>>,
) -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(jobs.create_job(body.into_inner()).await?))
}

pub async fn update_job(
    _access: Access,
    jobs: web::Data<JobService>,
    id: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(jobs.update_job(&id, body.into_inner()).await?))
}

pub async fn delete_job(
    _access: Access,
    jobs: web::Data<JobService>,
    id: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(jobs.delete_job(&id).await?))
}
