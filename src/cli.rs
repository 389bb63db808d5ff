use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::api::job::service::{JobService, ServiceError};
use crate::receipt;

#[derive(Debug, Parser)]
#[command(name = "alteration-ledger", version, about = "Order ledger for an alteration shop")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP API (default)
    Serve,
    /// Bring the database schema up to date and exit
    Migrate,
    /// Print sales, job and customer counts per month
    Monthly,
    /// Print the receipt for one job
    Receipt {
        id: i64,
    },
    /// List jobs still waiting to be collected on a day
    Pending {
        /// Pickup date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

/// Run a one-shot reporting command and print its output
///
/// `Serve` and `Migrate` are handled by the binary before it gets here.
pub async fn run(command: &Command, service: &JobService) -> Result<(), ServiceError> {
    match command {
        Command::Serve | Command::Migrate => {}
        Command::Monthly => print!("{}", monthly(service).await?),
        Command::Receipt { id } => print!("{}", service.receipt(*id).await?),
        Command::Pending { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            print!("{}", pending(service, date).await?);
        }
    }
    Ok(())
}

async fn monthly(service: &JobService) -> Result<String, ServiceError> {
    let summary = service.monthly_summary().await?;
    let Some(latest) = summary.latest else {
        return Ok("No jobs recorded\n".to_string());
    };

    let mut out = format!("{:<8} {:>14} {:>6} {:>10}\n", "month", "sales", "jobs", "customers");
    for row in &summary.rows {
        out.push_str(&format!(
            "{:<8} {:>14} {:>6} {:>10}\n",
            row.year_month,
            receipt::thousands(row.price_sum),
            row.job_count,
            row.customer_count
        ));
    }
    out.push_str(&format!(
        "\nLatest month ({})\n- sales: {} won\n- jobs: {}\n- customers: {}\n",
        latest.year_month,
        receipt::thousands(latest.price_sum),
        latest.job_count,
        latest.customer_count
    ));
    Ok(out)
}

async fn pending(service: &JobService, date: NaiveDate) -> Result<String, ServiceError> {
    let pickups = service.pending_pickups(date).await?;
    if pickups.jobs.is_empty() {
        return Ok(format!("Nothing due for pickup on {date}\n"));
    }

    let mut out = format!(
        "Due {date}: {} customers, {} garments\n",
        pickups.totals.customer_count, pickups.totals.job_count
    );
    for job in &pickups.jobs {
        let work = receipt::work_items(job);
        let work = if work.is_empty() {
            "no work recorded".to_string()
        } else {
            work.join(", ")
        };
        out.push_str(&format!(
            "[{}] {} | {} | dropped off {} | {} | {} | {} won ({})\n",
            job.id,
            job.customer_name.as_deref().unwrap_or("no name"),
            job.customer_phone.as_deref().filter(|p| !p.is_empty()).unwrap_or("no phone"),
            job.dropoff_date,
            job.item_type,
            work,
            receipt::thousands(job.price),
            job.payment_method,
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::get_connection;
    use crate::db::job_repository::JobRepository;
    use crate::db::migrations::run_migrations;
    use crate::db::models::{JobFields, PaymentMethod};

    async fn service() -> (JobService, sqlx::SqlitePool) {
        let pool = get_connection("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool).await.unwrap();
        (JobService::new(pool.clone(), "Shop"), pool)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::parse_from(["alteration-ledger", "pending", "--date", "2024-03-04"]);
        assert_eq!(
            cli.command,
            Some(Command::Pending {
                date: Some(date("2024-03-04"))
            })
        );

        let cli = Cli::parse_from(["alteration-ledger", "receipt", "12"]);
        assert_eq!(cli.command, Some(Command::Receipt { id: 12 }));

        let cli = Cli::parse_from(["alteration-ledger"]);
        assert_eq!(cli.command, None);
    }

    #[tokio::test]
    async fn monthly_output_lists_rows_and_latest() {
        let (service, pool) = service().await;
        for (dropoff, price) in [("2024-03-05", 10000), ("2024-03-20", 20000)] {
            JobRepository::create(&pool, &JobFields::new(date(dropoff), "pants", price, PaymentMethod::Card))
                .await
                .unwrap();
        }

        let out = monthly(&service).await.unwrap();

        assert!(out.contains("2024-03"));
        assert!(out.contains("30,000"));
        assert!(out.contains("Latest month (2024-03)"));
    }

    #[tokio::test]
    async fn monthly_output_for_empty_store() {
        let (service, _pool) = service().await;
        assert_eq!(monthly(&service).await.unwrap(), "No jobs recorded\n");
    }

    #[tokio::test]
    async fn pending_output_marks_missing_work() {
        let (service, pool) = service().await;
        let mut fields = JobFields::new(date("2024-03-01"), "coat", 9000, PaymentMethod::Cash);
        fields.pickup_date = Some(date("2024-03-04"));
        JobRepository::create(&pool, &fields).await.unwrap();

        let out = pending(&service, date("2024-03-04")).await.unwrap();

        assert!(out.contains("1 customers, 1 garments"));
        assert!(out.contains("no work recorded"));
        assert!(out.contains("no name"));
    }
}
