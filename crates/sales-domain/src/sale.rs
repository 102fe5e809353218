//! Sale records and the candidate/update requests that produce them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::Displayable;

/// Identifier assigned by the record store. Never reused after deletion.
pub type SaleId = u64;

/// One persisted sale transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: SaleId,
    pub order_date: NaiveDate,
    pub product: String,
    pub customer: String,
    pub quantity: u32,
    pub sales: f64,
    pub profit: f64,
    pub created_at: DateTime<Utc>,
}

impl Displayable for SaleRecord {
    fn display_label(&self) -> String {
        format!(
            "sale #{} [{} -> {} on {}]",
            self.id, self.product, self.customer, self.order_date
        )
    }
}

/// Unvalidated sale input as typed by a user.
///
/// `quantity` is signed so that zero and negative entries can be reported back
/// instead of being silently clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub order_date: NaiveDate,
    pub product: String,
    pub customer: String,
    pub quantity: i64,
    pub sales: f64,
    pub profit: f64,
}

impl NewSale {
    pub fn new(
        order_date: NaiveDate,
        product: impl Into<String>,
        customer: impl Into<String>,
        quantity: i64,
        sales: f64,
        profit: f64,
    ) -> Self {
        Self {
            order_date,
            product: product.into(),
            customer: customer.into(),
            quantity,
            sales,
            profit,
        }
    }
}

impl From<&SaleRecord> for NewSale {
    fn from(record: &SaleRecord) -> Self {
        Self {
            order_date: record.order_date,
            product: record.product.clone(),
            customer: record.customer.clone(),
            quantity: i64::from(record.quantity),
            sales: record.sales,
            profit: record.profit,
        }
    }
}

/// Partial update over the mutable fields of a sale.
///
/// `id` and `created_at` are not representable here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleUpdate {
    pub order_date: Option<NaiveDate>,
    pub product: Option<String>,
    pub customer: Option<String>,
    pub quantity: Option<i64>,
    pub sales: Option<f64>,
    pub profit: Option<f64>,
}

impl SaleUpdate {
    pub fn is_empty(&self) -> bool {
        self.order_date.is_none()
            && self.product.is_none()
            && self.customer.is_none()
            && self.quantity.is_none()
            && self.sales.is_none()
            && self.profit.is_none()
    }

    /// Overlays the update on `record`, yielding a candidate that still has to be validated.
    pub fn apply_to(&self, record: &SaleRecord) -> NewSale {
        let mut candidate = NewSale::from(record);
        if let Some(date) = self.order_date {
            candidate.order_date = date;
        }
        if let Some(product) = &self.product {
            candidate.product = product.clone();
        }
        if let Some(customer) = &self.customer {
            candidate.customer = customer.clone();
        }
        if let Some(quantity) = self.quantity {
            candidate.quantity = quantity;
        }
        if let Some(sales) = self.sales {
            candidate.sales = sales;
        }
        if let Some(profit) = self.profit {
            candidate.profit = profit;
        }
        candidate
    }
}
