//! Order ledger for a clothing-alteration shop: drop-off and pickup jobs,
//! payment and pickup status, printable receipts and monthly totals.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod draft;
pub mod logging;
pub mod phone;
pub mod receipt;
pub mod reporting;
pub mod shutdown;
