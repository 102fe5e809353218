//! Filter parameters for one reporting pass.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label used by the product selector to mean "no product filtering".
pub const ALL_PRODUCTS: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Inclusive calendar range `[start, end]`.
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if end < start {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateRange`] values.
pub enum DateRangeError {
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRangeError::InvalidRange { start, end } => {
                write!(f, "date range end {end} is before start {start}")
            }
        }
    }
}

impl std::error::Error for DateRangeError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Selects either every product or exactly one, matched case-sensitively.
pub enum ProductSelector {
    #[default]
    All,
    Named(String),
}

impl ProductSelector {
    /// Interprets `"All"` as no filtering; any other label selects that exact product.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_PRODUCTS {
            ProductSelector::All
        } else {
            ProductSelector::Named(label.to_string())
        }
    }

    pub fn matches(&self, product: &str) -> bool {
        match self {
            ProductSelector::All => true,
            ProductSelector::Named(name) => name == product,
        }
    }
}

impl fmt::Display for ProductSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductSelector::All => f.write_str(ALL_PRODUCTS),
            ProductSelector::Named(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Errors raised when building a [`ReportFilter`].
pub enum FilterError {
    InvalidThreshold { field: &'static str, value: f64 },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidThreshold { field, value } => {
                write!(f, "{field} must be a non-negative amount (got {value})")
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Immutable filter request: date range, product selector and minimum thresholds.
///
/// The default filter keeps every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportFilter {
    date_range: Option<DateRange>,
    product: ProductSelector,
    min_sales: f64,
    min_profit: f64,
}

impl ReportFilter {
    pub fn new(
        date_range: Option<DateRange>,
        product: ProductSelector,
        min_sales: f64,
        min_profit: f64,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            date_range,
            product,
            min_sales: checked_threshold("min_sales", min_sales)?,
            min_profit: checked_threshold("min_profit", min_profit)?,
        })
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_product(mut self, product: ProductSelector) -> Self {
        self.product = product;
        self
    }

    pub fn with_min_sales(mut self, value: f64) -> Result<Self, FilterError> {
        self.min_sales = checked_threshold("min_sales", value)?;
        Ok(self)
    }

    pub fn with_min_profit(mut self, value: f64) -> Result<Self, FilterError> {
        self.min_profit = checked_threshold("min_profit", value)?;
        Ok(self)
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    pub fn product(&self) -> &ProductSelector {
        &self.product
    }

    pub fn min_sales(&self) -> f64 {
        self.min_sales
    }

    pub fn min_profit(&self) -> f64 {
        self.min_profit
    }
}

fn checked_threshold(field: &'static str, value: f64) -> Result<f64, FilterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FilterError::InvalidThreshold { field, value })
    }
}
