use chrono::NaiveDate;
use serde::Serialize;

use crate::db::models::JobRow;
use crate::draft::JobDraft;
use crate::reporting::{MonthRow, PeriodTotals};

/// Response for single job creation
#[derive(Serialize)]
pub struct JobResponse {
    pub message: String,
    pub job: JobRow,
}

/// Jobs in a drop-off period with their totals
#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobRow>,
    pub totals: PeriodTotals,
}

/// Jobs still waiting to be collected on a given day
#[derive(Serialize)]
pub struct PickupResponse {
    pub date: NaiveDate,
    pub jobs: Vec<JobRow>,
    pub totals: PeriodTotals,
}

/// Receipts split by whether they were ever printed
#[derive(Serialize)]
pub struct PrintQueueResponse {
    pub new: Vec<JobRow>,
    pub reprint: Vec<JobRow>,
}

#[derive(Serialize)]
pub struct MonthlyResponse {
    pub rows: Vec<MonthRow>,
    pub latest: Option<MonthRow>,
}

#[derive(Serialize)]
pub struct DraftSaveResponse {
    pub job: JobRow,
    pub next_draft: JobDraft,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}
