//! sales-core
//!
//! Filtering, bucketing, aggregation, ranking and derived metrics for sale records,
//! plus the validated-insert boundary and the record store contract.
//! Depends on sales-domain. No CLI, no terminal I/O, no direct file access.

pub mod aggregate;
pub mod bucket;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod ranking;
pub mod report_service;
pub mod sale_service;
pub mod storage;
pub mod time;
pub mod validation;

pub use error::{CoreError, ValidationError};
pub use report_service::ReportService;
pub use sale_service::{InsertOutcome, SaleService};
pub use storage::{MemorySaleStore, SaleStore};
pub use time::{Clock, FixedClock, SystemClock};
pub use validation::ValidatedSale;
