use actix_web::{get, post, web, HttpResponse};
use actix_web_validator::Json;
use chrono::Local;

use crate::api::job::models::DraftSaveRequest;
use crate::api::job::service::{JobService, ServiceError};
use crate::api::session::AdminSession;
use crate::draft::JobDraft;

#[get("/new")]
async fn new_draft() -> HttpResponse {
    HttpResponse::Ok().json(JobDraft::new(Local::now().date_naive()))
}

#[post("/save")]
async fn save_draft(
    service: web::Data<JobService>,
    _admin: AdminSession,
    request: Json<DraftSaveRequest>,
) -> Result<HttpResponse, ServiceError> {
    let today = Local::now().date_naive();
    let saved = service
        .save_draft(&request.draft, request.same_customer, today)
        .await?;
    Ok(HttpResponse::Created().json(saved))
}

pub fn draft_config(config: &mut web::ServiceConfig) {
    config.service(web::scope("drafts").service(new_draft).service(save_draft));
}
