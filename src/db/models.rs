use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Database representation of a job with all fields
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct JobRow {
    pub id: i64,
    pub dropoff_date: NaiveDate,
    pub pickup_date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub item_type: String,
    pub work_hem: bool,
    pub work_sleeve: bool,
    pub work_width: bool,
    pub work_other: Option<String>,
    pub price: i64,
    pub payment_method: String,
    pub is_prepaid: bool,
    pub picked_up: bool,
    pub printed_count: i64,
    pub memo: Option<String>,
    pub created_at: NaiveDateTime,
}

/// How the customer pays
///
/// Stored as free text; rows written by other tools may hold anything.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied values for creating or overwriting a job
#[derive(Debug, Clone, PartialEq)]
pub struct JobFields {
    pub dropoff_date: NaiveDate,
    pub pickup_date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    /// Raw phone entry; normalized by the repository before storage
    pub customer_phone: Option<String>,
    pub item_type: String,
    pub work_hem: bool,
    pub work_sleeve: bool,
    pub work_width: bool,
    /// Set only when the "other work" box is ticked
    pub work_other: Option<String>,
    pub price: i64,
    pub payment_method: PaymentMethod,
    pub is_prepaid: bool,
    pub memo: Option<String>,
}

impl JobFields {
    /// Minimal fields for a job dropped off on `dropoff_date`
    pub fn new(
        dropoff_date: NaiveDate,
        item_type: impl Into<String>,
        price: i64,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            dropoff_date,
            pickup_date: None,
            customer_name: None,
            customer_phone: None,
            item_type: item_type.into(),
            work_hem: false,
            work_sleeve: false,
            work_width: false,
            work_other: None,
            price,
            payment_method,
            is_prepaid: false,
            memo: None,
        }
    }
}
