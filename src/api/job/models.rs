use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::{JobFields, PaymentMethod};
use crate::draft::JobDraft;

/// Job fields as submitted by the entry and edit forms
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct JobPayload {
    pub dropoff_date: NaiveDate,
    pub pickup_date: Option<NaiveDate>,
    #[validate(length(max = 100, message = "Customer name must be at most 100 characters"))]
    pub customer_name: Option<String>,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub customer_phone: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Item type must be between 1 and 100 characters"))]
    pub item_type: String,
    #[serde(default)]
    pub work_hem: bool,
    #[serde(default)]
    pub work_sleeve: bool,
    #[serde(default)]
    pub work_width: bool,
    pub work_other: Option<String>,
    #[validate(range(min = 0, max = 100000000, message = "Price must be between 0 and 100,000,000"))]
    pub price: i64,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub is_prepaid: bool,
    pub memo: Option<String>,
}

impl JobPayload {
    pub fn to_fields(&self) -> JobFields {
        JobFields {
            dropoff_date: self.dropoff_date,
            pickup_date: self.pickup_date,
            customer_name: self.customer_name.clone(),
            customer_phone: self.customer_phone.clone(),
            item_type: self.item_type.clone(),
            work_hem: self.work_hem,
            work_sleeve: self.work_sleeve,
            work_width: self.work_width,
            work_other: self.work_other.clone(),
            price: self.price,
            payment_method: self.payment_method,
            is_prepaid: self.is_prepaid,
            memo: self.memo.clone(),
        }
    }
}

/// Edit form: every field plus the picked-up box
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct JobUpdatePayload {
    #[serde(flatten)]
    #[validate(nested)]
    pub job: JobPayload,
    #[serde(default)]
    pub picked_up: bool,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Save the current entry form and get the next one back
#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct DraftSaveRequest {
    #[validate(nested)]
    pub draft: JobDraft,
    #[serde(default)]
    pub same_customer: bool,
}

/// Drop-off date filter; applied only when both bounds are present
#[derive(Deserialize, Debug, Default)]
pub struct DateRangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRangeQuery {
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct PickupQuery {
    pub date: Option<NaiveDate>,
}
