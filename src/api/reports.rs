use actix_web::{get, web, HttpResponse};
use chrono::Local;

use crate::api::job::models::PickupQuery;
use crate::api::job::service::{JobService, ServiceError};

/// Pickup dashboard; defaults to today
#[get("/pickups")]
async fn pending_pickups(
    service: web::Data<JobService>,
    query: web::Query<PickupQuery>,
) -> Result<HttpResponse, ServiceError> {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let pickups = service.pending_pickups(date).await?;
    Ok(HttpResponse::Ok().json(pickups))
}

#[get("/reports/monthly")]
async fn monthly_summary(service: web::Data<JobService>) -> Result<HttpResponse, ServiceError> {
    let monthly = service.monthly_summary().await?;
    Ok(HttpResponse::Ok().json(monthly))
}

pub fn report_config(config: &mut web::ServiceConfig) {
    config.service(pending_pickups).service(monthly_summary);
}
