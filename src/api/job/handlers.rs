use actix_web::{
    delete, get, post, put,
    web::{Data, Path, Query, ServiceConfig, scope},
    HttpResponse,
};
use actix_web_validator::Json;

use super::models::{DateRangeQuery, JobPayload, JobUpdatePayload};
use super::service::{JobService, ServiceError};
use crate::api::session::AdminSession;

#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    query: Query<DateRangeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let listed = service.list_jobs(query.range()).await?;
    Ok(HttpResponse::Ok().json(listed))
}

#[post("")]
async fn create_job(
    service: Data<JobService>,
    _admin: AdminSession,
    job: Json<JobPayload>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.create_job(&job).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/{id}")]
async fn get_job(service: Data<JobService>, id: Path<i64>) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[put("/{id}")]
async fn update_job(
    service: Data<JobService>,
    _admin: AdminSession,
    id: Path<i64>,
    update: Json<JobUpdatePayload>,
) -> Result<HttpResponse, ServiceError> {
    service.update_job(id.into_inner(), &update).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/{id}")]
async fn delete_job(
    service: Data<JobService>,
    _admin: AdminSession,
    id: Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    service.delete_job(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/{id}/picked-up")]
async fn mark_picked_up(
    service: Data<JobService>,
    _admin: AdminSession,
    id: Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    service.mark_picked_up(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/{id}/receipt")]
async fn receipt(
    service: Data<JobService>,
    _admin: AdminSession,
    id: Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    let text = service.receipt(id.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(text))
}

#[post("/{id}/printed")]
async fn mark_printed(
    service: Data<JobService>,
    _admin: AdminSession,
    id: Path<i64>,
) -> Result<HttpResponse, ServiceError> {
    service.mark_printed(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/print-queue")]
async fn print_queue(
    service: Data<JobService>,
    _admin: AdminSession,
    query: Query<DateRangeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let queue = service.print_queue(query.range()).await?;
    Ok(HttpResponse::Ok().json(queue))
}

pub fn job_config(config: &mut ServiceConfig) {
    config
        .service(
            scope("jobs")
                .service(list_jobs)
                .service(create_job)
                .service(get_job)
                .service(update_job)
                .service(delete_job)
                .service(mark_picked_up)
                .service(receipt)
                .service(mark_printed),
        )
        .service(print_queue);
}
