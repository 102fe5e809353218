//! The single boundary where sale candidates become storable.

use chrono::{DateTime, NaiveDate, Utc};
use sales_domain::{NewSale, SaleId, SaleRecord};

use crate::ValidationError;

/// A sale candidate that passed validation.
///
/// Only [`ValidatedSale::validate`] constructs this type, so a store that accepts it
/// never sees empty labels, non-positive quantities, negative amounts or
/// `profit > sales`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSale {
    order_date: NaiveDate,
    product: String,
    customer: String,
    quantity: u32,
    sales: f64,
    profit: f64,
}

impl ValidatedSale {
    pub fn validate(candidate: NewSale) -> Result<Self, ValidationError> {
        let product = candidate.product.trim();
        let customer = candidate.customer.trim();
        if product.is_empty() || customer.is_empty() {
            return Err(ValidationError::MissingLabel);
        }
        if candidate.profit > candidate.sales {
            return Err(ValidationError::ProfitExceedsSales);
        }
        if candidate.quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity);
        }
        let quantity = u32::try_from(candidate.quantity)
            .map_err(|_| ValidationError::QuantityTooLarge(candidate.quantity))?;
        if !is_amount(candidate.sales) || !is_amount(candidate.profit) {
            return Err(ValidationError::InvalidAmount);
        }
        Ok(Self {
            order_date: candidate.order_date,
            product: product.to_string(),
            customer: customer.to_string(),
            quantity,
            sales: candidate.sales,
            profit: candidate.profit,
        })
    }

    pub fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn sales(&self) -> f64 {
        self.sales
    }

    pub fn profit(&self) -> f64 {
        self.profit
    }

    /// Materializes the record with the identity and timestamp the store assigned.
    pub fn into_record(self, id: SaleId, created_at: DateTime<Utc>) -> SaleRecord {
        SaleRecord {
            id,
            order_date: self.order_date,
            product: self.product,
            customer: self.customer,
            quantity: self.quantity,
            sales: self.sales,
            profit: self.profit,
            created_at,
        }
    }
}

/// Re-checks a record that was read back from storage.
pub fn check_record(record: &SaleRecord) -> Result<(), ValidationError> {
    ValidatedSale::validate(NewSale::from(record)).map(|_| ())
}

fn is_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(product: &str, customer: &str, quantity: i64, sales: f64, profit: f64) -> NewSale {
        NewSale::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            product,
            customer,
            quantity,
            sales,
            profit,
        )
    }

    #[test]
    fn trims_labels() {
        let sale = ValidatedSale::validate(candidate("  Widget ", " Acme", 1, 10.0, 2.0))
            .expect("valid sale");
        assert_eq!(sale.product(), "Widget");
        assert_eq!(sale.customer(), "Acme");
    }

    #[test]
    fn rejects_blank_labels() {
        let err = ValidatedSale::validate(candidate("   ", "Acme", 1, 10.0, 2.0)).unwrap_err();
        assert_eq!(err, ValidationError::MissingLabel);
        let err = ValidatedSale::validate(candidate("Widget", "", 1, 10.0, 2.0)).unwrap_err();
        assert_eq!(err, ValidationError::MissingLabel);
    }

    #[test]
    fn rejects_profit_above_sales() {
        let err = ValidatedSale::validate(candidate("Widget", "Acme", 1, 10.0, 10.5)).unwrap_err();
        assert_eq!(err, ValidationError::ProfitExceedsSales);
        assert_eq!(err.to_string(), "Profit cannot be greater than sales amount");
    }

    #[test]
    fn profit_equal_to_sales_is_allowed() {
        assert!(ValidatedSale::validate(candidate("Widget", "Acme", 1, 10.0, 10.0)).is_ok());
    }

    #[test]
    fn rejects_zero_and_negative_quantity() {
        for quantity in [0, -3] {
            let err = ValidatedSale::validate(candidate("Widget", "Acme", quantity, 10.0, 1.0))
                .unwrap_err();
            assert_eq!(err, ValidationError::NonPositiveQuantity);
        }
    }

    #[test]
    fn rejects_negative_and_non_finite_amounts() {
        let err = ValidatedSale::validate(candidate("Widget", "Acme", 1, 10.0, -1.0)).unwrap_err();
        assert_eq!(err, ValidationError::InvalidAmount);
        let err =
            ValidatedSale::validate(candidate("Widget", "Acme", 1, f64::NAN, 0.0)).unwrap_err();
        assert_eq!(err, ValidationError::InvalidAmount);
    }

    #[test]
    fn rejects_quantity_beyond_u32() {
        let err = ValidatedSale::validate(candidate("Widget", "Acme", i64::MAX, 10.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, ValidationError::QuantityTooLarge(_)));
    }
}
