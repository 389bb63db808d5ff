//! Fixed-layout receipt text for a single job.

use crate::db::models::JobRow;

const RULE: &str = "────────────────────────";
const CURRENCY_SUFFIX: &str = "won";

/// Labels for the ticked work items followed by any other-work text
///
/// Returns an empty list when nothing was recorded; callers choose how to
/// display that.
pub fn work_items(job: &JobRow) -> Vec<&str> {
    let mut items = Vec::with_capacity(4);
    if job.work_hem {
        items.push("hem-length");
    }
    if job.work_sleeve {
        items.push("sleeve");
    }
    if job.work_width {
        items.push("body-width");
    }
    if let Some(other) = job.work_other.as_deref().filter(|text| !text.is_empty()) {
        items.push(other);
    }
    items
}

pub fn work_description(job: &JobRow) -> String {
    let items = work_items(job);
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

pub fn payment_status(job: &JobRow) -> &'static str {
    if job.is_prepaid {
        "prepaid"
    } else {
        "unpaid"
    }
}

/// Group an amount in threes: `1234567` becomes `1,234,567`
pub fn thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render the internal receipt for an already-loaded job
pub fn format(job: &JobRow, shop_name: &str) -> String {
    format!(
        "{RULE}\n        {shop_name}\n{RULE}\n\
         Customer: {customer}\n\
         Phone: {phone}\n\
         \n\
         Drop-off: {dropoff}\n\
         Pickup: {pickup}\n\
         \n\
         Item: {item}\n\
         Work: {work}\n\
         \n\
         Payment: {status}\n\
         Method: {method}\n\
         \n\
         Price: {price} {CURRENCY_SUFFIX}\n\
         No.: #{id}\n\
         {RULE}\n        internal copy\n{RULE}\n",
        customer = job.customer_name.as_deref().unwrap_or_default(),
        phone = job.customer_phone.as_deref().unwrap_or_default(),
        dropoff = job.dropoff_date.format("%Y-%m-%d"),
        pickup = job
            .pickup_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        item = job.item_type,
        work = work_description(job),
        status = payment_status(job),
        method = job.payment_method,
        price = thousands(job.price),
        id = job.id,
    )
}
