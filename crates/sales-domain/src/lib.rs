//! sales-domain
//!
//! Pure domain models (SaleRecord, filters, buckets, report rows).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod filter;
pub mod period;
pub mod report;
pub mod sale;

pub use common::*;
pub use filter::*;
pub use period::*;
pub use report::*;
pub use sale::*;
