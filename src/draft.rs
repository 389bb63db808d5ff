//! Caller-owned state for the job entry form.
//!
//! The draft travels between the presentation layer and the core; nothing
//! here remembers a previous customer or a running price.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::{JobFields, PaymentMethod};
use crate::phone;

pub const DEFAULT_PRICE: i64 = 4000;
pub const PHONE_PLACEHOLDER: &str = "010-";
pub const PICKUP_LEAD_DAYS: u64 = 3;

/// Quick increments offered next to the price field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceStep {
    OneThousand,
    FiveThousand,
    TenThousand,
    FiftyThousand,
}

impl PriceStep {
    pub fn amount(self) -> i64 {
        match self {
            PriceStep::OneThousand => 1_000,
            PriceStep::FiveThousand => 5_000,
            PriceStep::TenThousand => 10_000,
            PriceStep::FiftyThousand => 50_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct JobDraft {
    #[validate(length(max = 100, message = "Customer name must be at most 100 characters"))]
    pub customer_name: String,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub customer_phone: String,
    pub dropoff_date: NaiveDate,
    pub pickup_date: NaiveDate,
    #[validate(length(min = 1, max = 100, message = "Item type must be between 1 and 100 characters"))]
    pub item_type: String,
    pub work_hem: bool,
    pub work_sleeve: bool,
    pub work_width: bool,
    /// `Some` while the "other work" box is ticked, even if nothing is typed yet
    pub work_other: Option<String>,
    #[validate(range(min = 0, max = 100000000, message = "Price must be between 0 and 100,000,000"))]
    pub price: i64,
    pub payment_method: PaymentMethod,
    pub is_prepaid: bool,
    pub memo: String,
}

impl JobDraft {
    /// A blank form for a customer walking in on `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            customer_name: String::new(),
            customer_phone: PHONE_PLACEHOLDER.to_string(),
            dropoff_date: today,
            pickup_date: default_pickup(today),
            item_type: String::new(),
            work_hem: false,
            work_sleeve: false,
            work_width: false,
            work_other: None,
            price: DEFAULT_PRICE,
            payment_method: PaymentMethod::Card,
            is_prepaid: true,
            memo: String::new(),
        }
    }

    pub fn bump_price(&mut self, step: PriceStep) {
        self.price = self.price.saturating_add(step.amount());
    }

    /// Values to hand to the job store
    ///
    /// An untouched phone placeholder counts as no phone.
    pub fn to_fields(&self) -> JobFields {
        JobFields {
            dropoff_date: self.dropoff_date,
            pickup_date: Some(self.pickup_date),
            customer_name: non_blank(&self.customer_name),
            customer_phone: non_blank(&self.customer_phone)
                .filter(|phone| phone != PHONE_PLACEHOLDER),
            item_type: self.item_type.clone(),
            work_hem: self.work_hem,
            work_sleeve: self.work_sleeve,
            work_width: self.work_width,
            work_other: self.work_other.as_deref().and_then(non_blank),
            price: self.price,
            payment_method: self.payment_method,
            is_prepaid: self.is_prepaid,
            memo: non_blank(&self.memo),
        }
    }

    /// The form to show after this draft has been saved
    ///
    /// Continuing with the same customer keeps who they are and both dates;
    /// otherwise the form starts over for `today`. The price always resets.
    pub fn next(&self, same_customer: bool, today: NaiveDate) -> Self {
        let mut next = Self::new(today);
        if same_customer {
            next.customer_name = self.customer_name.clone();
            let phone = phone::normalize(Some(&self.customer_phone));
            next.customer_phone = if phone.is_empty() {
                PHONE_PLACEHOLDER.to_string()
            } else {
                phone
            };
            next.dropoff_date = self.dropoff_date;
            next.pickup_date = self.pickup_date;
        }
        next
    }
}

fn default_pickup(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(PICKUP_LEAD_DAYS))
        .unwrap_or(today)
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
