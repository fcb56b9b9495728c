use crate::enums::Trend;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The identifier of the user a sales record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub i64);

impl OwnerId {
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OwnerId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(OwnerId)
            .map_err(|e| CoreError::InvalidInput("owner id".to_string(), format!("'{}': {}", s, e)))
    }
}

/// A single sales row as it is stored.
///
/// The date is kept exactly as it was uploaded. It is only interpreted, through
/// [`crate::parse_sale_date`], when records are aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: i64,
    pub owner: OwnerId,
    /// The ingestion batch that produced this record.
    pub import_id: Uuid,
    pub date: String,
    pub product: String,
    pub quantity: i64,
}

impl SalesRecord {
    /// The record's date under the parsing policy, or `None` if it is unparseable.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        crate::dates::parse_sale_date(&self.date)
    }
}

/// A parsed CSV row that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSalesRecord {
    pub date: String,
    pub product: String,
    pub quantity: i64,
}

/// Total quantity sold on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub total_quantity: i64,
}

/// One point of the moving-average forecast series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub total_quantity: i64,
    /// Mean of `total_quantity` over the trailing window ending at this point.
    pub forecast: f64,
}

/// A product together with the quantity sold across all of its dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTotal {
    pub product: String,
    pub total_quantity: i64,
}

/// A date together with the quantity sold on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total_quantity: i64,
}

impl From<DailyAggregate> for DayTotal {
    fn from(aggregate: DailyAggregate) -> Self {
        Self {
            date: aggregate.date,
            total_quantity: aggregate.total_quantity,
        }
    }
}

/// Descriptive statistics over an owner's sales.
///
/// Each field resolves independently; a missing part never hides the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub best_selling_product: Option<ProductTotal>,
    pub lowest_sales_day: Option<DayTotal>,
    pub trend: Trend,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_id_parses_with_surrounding_whitespace() {
        assert_eq!(" 42 ".parse::<OwnerId>(), Ok(OwnerId(42)));
    }

    #[test]
    fn owner_id_rejects_non_numeric_input() {
        let err = "abc".parse::<OwnerId>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref field, _) if field == "owner id"));
    }

    #[test]
    fn trend_serializes_as_snake_case() {
        let json = serde_json::to_string(&Trend::InsufficientData).unwrap();
        assert_eq!(json, "\"insufficient_data\"");
    }

    #[test]
    fn owner_id_serializes_transparently() {
        assert_eq!(serde_json::to_string(&OwnerId(7)).unwrap(), "7");
    }
}
