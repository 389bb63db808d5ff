use actix_web::{HttpResponse, ResponseError};
use chrono::NaiveDate;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{error, info, warn};

use super::dto::{
    DraftSaveResponse, JobListResponse, JobResponse, MonthlyResponse, PickupResponse,
    PrintQueueResponse,
};
use super::models::{JobPayload, JobUpdatePayload};
use crate::api::validation::ErrorResponse;
use crate::db::job_repository::JobRepository;
use crate::db::models::JobRow;
use crate::draft::JobDraft;
use crate::receipt;
use crate::reporting::{MonthlySummary, PeriodTotals};

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Job not found
    #[error("Job not found: {0}")]
    NotFound(i64),

    /// Missing or unknown admin session
    #[error("Admin session required")]
    Unauthorized,
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::DatabaseError(e) => {
                error!("Database error: {}", e);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to process request".to_string(),
                    fields: serde_json::json!({"message": "Database error occurred"}),
                })
            }
            ServiceError::NotFound(id) => {
                warn!("Job not found: {}", id);
                HttpResponse::NotFound().json(ErrorResponse {
                    error: "Not found".to_string(),
                    fields: serde_json::json!({"message": format!("Job with id {} not found", id)}),
                })
            }
            ServiceError::Unauthorized => {
                warn!("Rejected request without a valid admin session");
                HttpResponse::Unauthorized().json(ErrorResponse {
                    error: "Unauthorized".to_string(),
                    fields: serde_json::json!({"message": "Admin login required"}),
                })
            }
        }
    }
}

/// Job service containing business logic
pub struct JobService {
    pool: SqlitePool,
    shop_name: String,
}

impl JobService {
    pub fn new(pool: SqlitePool, shop_name: impl Into<String>) -> Self {
        Self {
            pool,
            shop_name: shop_name.into(),
        }
    }

    /// Create a single job and return the stored record
    pub async fn create_job(&self, job: &JobPayload) -> Result<JobResponse, ServiceError> {
        info!(
            "Service: Creating job dropped off {} ({})",
            job.dropoff_date, job.item_type
        );

        let id = JobRepository::create(&self.pool, &job.to_fields()).await?;
        let job_row = self.get_job(id).await?;

        info!("Service: Job created successfully with id={}", id);

        Ok(JobResponse {
            message: "Job created successfully".to_string(),
            job: job_row,
        })
    }

    /// Overwrite a job; unknown ids are ignored
    pub async fn update_job(&self, id: i64, update: &JobUpdatePayload) -> Result<(), ServiceError> {
        info!("Service: Updating job id={}", id);
        JobRepository::update(&self.pool, id, &update.job.to_fields(), update.picked_up).await?;
        Ok(())
    }

    pub async fn delete_job(&self, id: i64) -> Result<(), ServiceError> {
        info!("Service: Deleting job id={}", id);
        JobRepository::delete(&self.pool, id).await?;
        Ok(())
    }

    pub async fn get_job(&self, id: i64) -> Result<JobRow, ServiceError> {
        JobRepository::find_by_id(&self.pool, id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Jobs dropped off within `range` (all jobs without one) plus totals
    pub async fn list_jobs(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<JobListResponse, ServiceError> {
        let jobs = JobRepository::list(&self.pool, range).await?;
        let totals = PeriodTotals::from_jobs(&jobs);

        Ok(JobListResponse { jobs, totals })
    }

    /// Pickup dashboard for one day
    pub async fn pending_pickups(&self, date: NaiveDate) -> Result<PickupResponse, ServiceError> {
        let jobs = JobRepository::list_pending_pickup(&self.pool, date).await?;
        let totals = PeriodTotals::from_jobs(&jobs);

        if jobs.is_empty() {
            info!("Service: Nothing due for pickup on {}", date);
        }

        Ok(PickupResponse { date, jobs, totals })
    }

    pub async fn mark_picked_up(&self, id: i64) -> Result<(), ServiceError> {
        info!("Service: Marking job id={} as picked up", id);
        JobRepository::mark_picked_up(&self.pool, id).await?;
        Ok(())
    }

    /// Receipt text for a stored job
    ///
    /// Viewing a receipt does not count as printing it.
    pub async fn receipt(&self, id: i64) -> Result<String, ServiceError> {
        let job = self.get_job(id).await?;
        Ok(receipt::format(&job, &self.shop_name))
    }

    pub async fn mark_printed(&self, id: i64) -> Result<(), ServiceError> {
        info!("Service: Recording printed receipt for job id={}", id);
        JobRepository::mark_printed(&self.pool, id).await?;
        Ok(())
    }

    /// Jobs in `range` split into never-printed and already-printed receipts
    pub async fn print_queue(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<PrintQueueResponse, ServiceError> {
        let jobs = JobRepository::list(&self.pool, range).await?;
        let (new, reprint): (Vec<JobRow>, Vec<JobRow>) =
            jobs.into_iter().partition(|job| job.printed_count == 0);

        Ok(PrintQueueResponse { new, reprint })
    }

    /// Monthly totals over every job ever recorded
    pub async fn monthly_summary(&self) -> Result<MonthlyResponse, ServiceError> {
        let jobs = JobRepository::list(&self.pool, None).await?;
        let summary = MonthlySummary::from_jobs(&jobs);
        let latest = summary.latest().cloned();

        Ok(MonthlyResponse {
            rows: summary.rows,
            latest,
        })
    }

    /// Store the job described by `draft` and prepare the next form
    ///
    /// The draft is expected to have passed `Validate` at the HTTP edge.
    pub async fn save_draft(
        &self,
        draft: &JobDraft,
        same_customer: bool,
        today: NaiveDate,
    ) -> Result<DraftSaveResponse, ServiceError> {
        let id = JobRepository::create(&self.pool, &draft.to_fields()).await?;
        let job = self.get_job(id).await?;
        info!("Service: Saved draft as job id={}", id);

        Ok(DraftSaveResponse {
            job,
            next_draft: draft.next(same_customer, today),
        })
    }
}
