//! # SalesCast Core Types
//!
//! The shared vocabulary of the workspace: sales records as they are stored,
//! the derived daily aggregates and forecast points, and the insight summary.
//! Every other crate depends on this one; it depends on nothing internal.
//!
//! It also owns the date parsing policy, since every layer that reads a
//! stored record has to agree on how its raw date text is interpreted.

pub mod dates;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use dates::parse_sale_date;
pub use enums::{RecordScope, Trend};
pub use error::CoreError;
pub use structs::{
    DailyAggregate, DayTotal, ForecastPoint, InsightSummary, NewSalesRecord, OwnerId,
    ProductTotal, SalesRecord,
};
