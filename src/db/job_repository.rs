use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::models::{JobFields, JobRow};
use crate::phone;

const JOB_COLUMNS: &str = "id, dropoff_date, pickup_date, customer_name, customer_phone, \
     item_type, work_hem, work_sleeve, work_width, work_other, price, payment_method, \
     is_prepaid, picked_up, COALESCE(printed_count, 0) AS printed_count, memo, created_at";

/// Repository for Job database operations
pub struct JobRepository;

impl JobRepository {
    /// Insert a new job and return its id
    ///
    /// The phone is normalized, the job starts out not picked up and never
    /// printed, and `created_at` is stamped with the local time.
    pub async fn create(pool: &SqlitePool, job: &JobFields) -> Result<i64, sqlx::Error> {
        debug!(
            "Creating job: dropoff_date={}, item_type={}, price={}",
            job.dropoff_date, job.item_type, job.price
        );

        let phone = phone::normalize(job.customer_phone.as_deref());
        let created_at = Local::now().naive_local().format("%Y-%m-%d %H:%M:%S").to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO jobs (
                dropoff_date, customer_name, customer_phone,
                item_type, work_hem, work_sleeve, work_width, work_other,
                price, payment_method, is_prepaid, pickup_date,
                picked_up, memo, printed_count, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, 0, ?)
            "#,
        )
        .bind(job.dropoff_date)
        .bind(job.customer_name.as_deref())
        .bind(phone)
        .bind(&job.item_type)
        .bind(job.work_hem)
        .bind(job.work_sleeve)
        .bind(job.work_width)
        .bind(other_work(job))
        .bind(job.price)
        .bind(job.payment_method.as_str())
        .bind(job.is_prepaid)
        .bind(job.pickup_date)
        .bind(job.memo.as_deref())
        .bind(created_at)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Job created with id={}", id);
        Ok(id)
    }

    /// Overwrite every mutable field of a job, including `picked_up`
    ///
    /// Does nothing when `id` does not exist.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        job: &JobFields,
        picked_up: bool,
    ) -> Result<(), sqlx::Error> {
        let phone = phone::normalize(job.customer_phone.as_deref());

        let result = sqlx::query(
            r#"
            UPDATE jobs SET
                dropoff_date = ?,
                customer_name = ?,
                customer_phone = ?,
                item_type = ?,
                work_hem = ?,
                work_sleeve = ?,
                work_width = ?,
                work_other = ?,
                price = ?,
                payment_method = ?,
                is_prepaid = ?,
                pickup_date = ?,
                picked_up = ?,
                memo = ?
            WHERE id = ?
            "#,
        )
        .bind(job.dropoff_date)
        .bind(job.customer_name.as_deref())
        .bind(phone)
        .bind(&job.item_type)
        .bind(job.work_hem)
        .bind(job.work_sleeve)
        .bind(job.work_width)
        .bind(other_work(job))
        .bind(job.price)
        .bind(job.payment_method.as_str())
        .bind(job.is_prepaid)
        .bind(job.pickup_date)
        .bind(picked_up)
        .bind(job.memo.as_deref())
        .bind(id)
        .execute(pool)
        .await?;

        debug!("Updated job id={}: {} rows affected", id, result.rows_affected());
        Ok(())
    }

    /// Remove a job; absent ids are ignored
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        debug!("Deleted job id={}: {} rows affected", id, result.rows_affected());
        Ok(())
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List jobs, newest drop-off first
    ///
    /// With a `(start, end)` range only jobs dropped off within it, bounds
    /// included, are returned. Ties on the date go to the higher id.
    pub async fn list(
        pool: &SqlitePool,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<JobRow>, sqlx::Error> {
        let jobs = match range {
            Some((start, end)) => {
                debug!("Listing jobs dropped off between {} and {}", start, end);
                sqlx::query_as::<_, JobRow>(&format!(
                    "SELECT {JOB_COLUMNS} FROM jobs WHERE dropoff_date BETWEEN ? AND ? \
                     ORDER BY dropoff_date DESC, id DESC"
                ))
                .bind(start)
                .bind(end)
                .fetch_all(pool)
                .await?
            }
            None => {
                debug!("Listing all jobs");
                sqlx::query_as::<_, JobRow>(&format!(
                    "SELECT {JOB_COLUMNS} FROM jobs ORDER BY dropoff_date DESC, id DESC"
                ))
                .fetch_all(pool)
                .await?
            }
        };

        Ok(jobs)
    }

    /// Jobs due for pickup on `target_date` that are still in the shop,
    /// longest-waiting first
    pub async fn list_pending_pickup(
        pool: &SqlitePool,
        target_date: NaiveDate,
    ) -> Result<Vec<JobRow>, sqlx::Error> {
        debug!("Listing jobs pending pickup on {}", target_date);

        sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE pickup_date = ? AND picked_up = 0 \
             ORDER BY dropoff_date ASC, id ASC"
        ))
        .bind(target_date)
        .fetch_all(pool)
        .await
    }

    pub async fn mark_picked_up(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE jobs SET picked_up = 1 WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        debug!("Marked job id={} as picked up", id);
        Ok(())
    }

    /// Record one more printed receipt for a job
    pub async fn mark_printed(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE jobs SET printed_count = COALESCE(printed_count, 0) + 1 WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        debug!("Marked job id={} as printed", id);
        Ok(())
    }
}

/// Blank other-work text is stored as NULL
fn other_work(job: &JobFields) -> Option<&str> {
    job.work_other.as_deref().filter(|text| !text.trim().is_empty())
}
