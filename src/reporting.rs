//! Period and monthly aggregates over listed jobs.
//!
//! A customer is counted once per drop-off day: the identity key is
//! `(name, phone, dropoff_date)` everywhere, so the same person bringing
//! garments on two different days counts as two customer visits.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::models::JobRow;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CustomerVisit<'a> {
    name: &'a str,
    phone: &'a str,
    dropoff_date: NaiveDate,
}

impl<'a> CustomerVisit<'a> {
    fn of(job: &'a JobRow) -> Self {
        Self {
            name: job.customer_name.as_deref().unwrap_or_default(),
            phone: job.customer_phone.as_deref().unwrap_or_default(),
            dropoff_date: job.dropoff_date,
        }
    }
}

/// Totals over a listed set of jobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub customer_count: usize,
    pub job_count: usize,
    pub price_sum: i64,
}

impl PeriodTotals {
    pub fn from_jobs(jobs: &[JobRow]) -> Self {
        let customers: HashSet<CustomerVisit<'_>> = jobs.iter().map(CustomerVisit::of).collect();

        Self {
            customer_count: customers.len(),
            job_count: jobs.len(),
            price_sum: price_sum(jobs.iter()),
        }
    }
}

/// One `YYYY-MM` row of the monthly summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthRow {
    pub year_month: String,
    pub price_sum: i64,
    pub job_count: usize,
    pub customer_count: usize,
}

/// Jobs grouped by drop-off month, oldest month first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub rows: Vec<MonthRow>,
}

impl MonthlySummary {
    pub fn from_jobs(jobs: &[JobRow]) -> Self {
        let mut months: BTreeMap<String, Vec<&JobRow>> = BTreeMap::new();
        for job in jobs {
            let year_month = job.dropoff_date.format("%Y-%m").to_string();
            months.entry(year_month).or_default().push(job);
        }

        let rows = months
            .into_iter()
            .map(|(year_month, jobs)| {
                let customers: HashSet<CustomerVisit<'_>> =
                    jobs.iter().map(|job| CustomerVisit::of(job)).collect();
                MonthRow {
                    year_month,
                    price_sum: price_sum(jobs.iter().copied()),
                    job_count: jobs.len(),
                    customer_count: customers.len(),
                }
            })
            .collect();

        Self { rows }
    }

    /// The most recent month with any jobs
    pub fn latest(&self) -> Option<&MonthRow> {
        self.rows.last()
    }
}

/// Sum of prices, pinned at `i64::MAX` rather than wrapping
fn price_sum<'a>(jobs: impl Iterator<Item = &'a JobRow>) -> i64 {
    jobs.fold(0i64, |sum, job| sum.saturating_add(job.price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rstest::rstest;

    fn job(id: i64, dropoff: &str, name: &str, phone: &str, price: i64) -> JobRow {
        JobRow {
            id,
            dropoff_date: NaiveDate::parse_from_str(dropoff, "%Y-%m-%d").unwrap(),
            pickup_date: None,
            customer_name: (!name.is_empty()).then(|| name.to_string()),
            customer_phone: (!phone.is_empty()).then(|| phone.to_string()),
            item_type: "pants".to_string(),
            work_hem: true,
            work_sleeve: false,
            work_width: false,
            work_other: None,
            price,
            payment_method: "cash".to_string(),
            is_prepaid: false,
            picked_up: false,
            printed_count: 0,
            memo: None,
            created_at: NaiveDateTime::parse_from_str("2024-01-01 00:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    #[test]
    fn empty_input_gives_zero_totals_and_no_rows() {
        assert_eq!(PeriodTotals::from_jobs(&[]), PeriodTotals::default());

        let summary = MonthlySummary::from_jobs(&[]);
        assert!(summary.rows.is_empty());
        assert_eq!(summary.latest(), None);
    }

    #[test]
    fn period_totals_count_visits_jobs_and_sum_prices() {
        let jobs = [
            job(1, "2024-03-05", "Kim", "010-1111-2222", 10000),
            job(2, "2024-03-05", "Kim", "010-1111-2222", 5000),
            job(3, "2024-03-06", "Kim", "010-1111-2222", 7000),
            job(4, "2024-03-06", "Lee", "", 3000),
        ];

        let totals = PeriodTotals::from_jobs(&jobs);

        assert_eq!(totals.job_count, 4);
        assert_eq!(totals.customer_count, 3);
        assert_eq!(totals.price_sum, 25000);
    }

    #[rstest]
    #[case::same_day_same_customer("2024-03-05", "Kim", 1)]
    #[case::same_customer_other_day("2024-03-06", "Kim", 2)]
    #[case::other_customer_same_day("2024-03-05", "Lee", 2)]
    fn customer_key_includes_dropoff_date(
        #[case] second_dropoff: &str,
        #[case] second_name: &str,
        #[case] expected: usize,
    ) {
        let jobs = [
            job(1, "2024-03-05", "Kim", "010-1111-2222", 1),
            job(2, second_dropoff, second_name, "010-1111-2222", 1),
        ];

        assert_eq!(PeriodTotals::from_jobs(&jobs).customer_count, expected);
    }

    #[test]
    fn monthly_summary_groups_by_year_month() {
        let jobs = [
            job(1, "2024-03-05", "Kim", "010-1111-2222", 10000),
            job(2, "2024-03-20", "Lee", "010-3333-4444", 20000),
        ];

        let summary = MonthlySummary::from_jobs(&jobs);

        assert_eq!(
            summary.rows,
            vec![MonthRow {
                year_month: "2024-03".to_string(),
                price_sum: 30000,
                job_count: 2,
                customer_count: 2,
            }]
        );
    }

    #[test]
    fn monthly_rows_ascend_and_latest_is_last() {
        // List order is newest first; the summary must not depend on it.
        let jobs = [
            job(4, "2024-05-01", "A", "", 4000),
            job(3, "2024-03-31", "B", "", 3000),
            job(2, "2023-12-24", "C", "", 2000),
            job(1, "2024-03-01", "B", "", 1000),
        ];

        let summary = MonthlySummary::from_jobs(&jobs);
        let months: Vec<&str> = summary.rows.iter().map(|r| r.year_month.as_str()).collect();

        assert_eq!(months, vec!["2023-12", "2024-03", "2024-05"]);
        let march = &summary.rows[1];
        assert_eq!(march.price_sum, 4000);
        assert_eq!(march.customer_count, 2);
        assert_eq!(summary.latest().map(|r| r.year_month.as_str()), Some("2024-05"));
    }

    #[test]
    fn huge_prices_saturate_instead_of_overflowing() {
        let jobs = [
            job(1, "2024-03-05", "Kim", "", i64::MAX),
            job(2, "2024-03-06", "Lee", "", 1),
        ];

        assert_eq!(PeriodTotals::from_jobs(&jobs).price_sum, i64::MAX);
        assert_eq!(MonthlySummary::from_jobs(&jobs).rows[0].price_sum, i64::MAX);
    }
}
