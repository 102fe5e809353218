//! Validated CRUD helpers over a [`SaleStore`].

use sales_domain::{NewSale, SaleId, SaleRecord, SaleUpdate};

use crate::{storage::SaleStore, validation::ValidatedSale, CoreError};

/// Result type returned by the fallible sale operations.
pub type SaleResult<T> = Result<T, CoreError>;

/// Outcome of an insert attempt, phrased for the person who typed the sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome {
    pub success: bool,
    pub message: String,
    pub id: Option<SaleId>,
}

impl InsertOutcome {
    pub fn accepted(record: &SaleRecord) -> Self {
        Self {
            success: true,
            message: format!("Sale record #{} added successfully", record.id),
            id: Some(record.id),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            id: None,
        }
    }
}

/// Stateless operations; every call goes through the supplied store.
pub struct SaleService;

impl SaleService {
    /// Validates and stores `candidate`, reporting the result as a user-facing message.
    ///
    /// Nothing is written when validation fails.
    pub fn add(store: &dyn SaleStore, candidate: NewSale) -> InsertOutcome {
        match Self::try_add(store, candidate) {
            Ok(record) => InsertOutcome::accepted(&record),
            Err(CoreError::Validation(err)) => InsertOutcome::rejected(err.to_string()),
            Err(err) => InsertOutcome::rejected(format!("Storage error: {}", err.detail())),
        }
    }

    /// Like [`SaleService::add`] but returns the stored record or the typed error.
    pub fn try_add(store: &dyn SaleStore, candidate: NewSale) -> SaleResult<SaleRecord> {
        let sale = ValidatedSale::validate(candidate).map_err(|err| {
            tracing::debug!(reason = %err, "sale rejected");
            err
        })?;
        let record = store.insert(sale)?;
        tracing::info!(id = record.id, product = %record.product, "sale added");
        Ok(record)
    }

    /// Every stored record, newest order date first.
    pub fn list(store: &dyn SaleStore) -> SaleResult<Vec<SaleRecord>> {
        store.fetch_all()
    }

    pub fn get(store: &dyn SaleStore, id: SaleId) -> SaleResult<SaleRecord> {
        store.fetch(id)?.ok_or(CoreError::SaleNotFound(id))
    }

    /// Applies `changes` to the record and re-validates the result as a whole.
    pub fn update(store: &dyn SaleStore, id: SaleId, changes: &SaleUpdate) -> SaleResult<SaleRecord> {
        if changes.is_empty() {
            return Err(CoreError::InvalidOperation("no fields to update".into()));
        }
        let current = Self::get(store, id)?;
        let sale = ValidatedSale::validate(changes.apply_to(&current))?;
        let updated = store.update(id, sale)?.ok_or(CoreError::SaleNotFound(id))?;
        tracing::info!(id, "sale updated");
        Ok(updated)
    }

    /// Permanently removes the record. Returns `false` when the id does not exist.
    pub fn delete(store: &dyn SaleStore, id: SaleId) -> SaleResult<bool> {
        let removed = store.delete(id)?;
        if removed {
            tracing::info!(id, "sale deleted");
        } else {
            tracing::debug!(id, "delete skipped; sale not found");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::{storage::MemorySaleStore, time::FixedClock};

    fn store() -> MemorySaleStore {
        MemorySaleStore::new(Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        )))
    }

    fn candidate(quantity: i64, sales: f64, profit: f64) -> NewSale {
        NewSale::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Widget",
            "Acme",
            quantity,
            sales,
            profit,
        )
    }

    #[test]
    fn add_reports_assigned_id() {
        let store = store();
        let outcome = SaleService::add(&store, candidate(2, 100.0, 20.0));
        assert!(outcome.success);
        assert_eq!(outcome.id, Some(1));
        assert_eq!(outcome.message, "Sale record #1 added successfully");
    }

    #[test]
    fn rejected_insert_leaves_store_untouched() {
        let store = store();
        let outcome = SaleService::add(&store, candidate(1, 50.0, 60.0));
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Profit cannot be greater than sales amount");
        assert_eq!(outcome.id, None);
        assert!(SaleService::list(&store).unwrap().is_empty());
    }

    #[test]
    fn update_revalidates_merged_record() {
        let store = store();
        let record = SaleService::try_add(&store, candidate(1, 100.0, 10.0)).unwrap();

        let bad = SaleUpdate {
            profit: Some(150.0),
            ..SaleUpdate::default()
        };
        let err = SaleService::update(&store, record.id, &bad).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let good = SaleUpdate {
            sales: Some(200.0),
            profit: Some(150.0),
            ..SaleUpdate::default()
        };
        let updated = SaleService::update(&store, record.id, &good).unwrap();
        assert_eq!(updated.profit, 150.0);
        assert_eq!(updated.created_at, record.created_at);
    }

    #[test]
    fn update_of_unknown_id_fails() {
        let changes = SaleUpdate {
            quantity: Some(3),
            ..SaleUpdate::default()
        };
        let err = SaleService::update(&store(), 42, &changes).unwrap_err();
        assert!(matches!(err, CoreError::SaleNotFound(42)));
    }

    #[test]
    fn delete_is_permanent_and_ids_are_not_reused() {
        let store = store();
        let first = SaleService::try_add(&store, candidate(1, 10.0, 1.0)).unwrap();
        assert!(SaleService::delete(&store, first.id).unwrap());
        assert!(!SaleService::delete(&store, first.id).unwrap());
        assert!(matches!(
            SaleService::get(&store, first.id),
            Err(CoreError::SaleNotFound(_))
        ));

        let second = SaleService::try_add(&store, candidate(1, 10.0, 1.0)).unwrap();
        assert!(second.id > first.id);
    }
}
