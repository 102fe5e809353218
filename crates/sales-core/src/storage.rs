use std::sync::{Arc, Mutex, MutexGuard};

use sales_domain::{SaleId, SaleRecord};

use crate::{time::Clock, validation::ValidatedSale, CoreError};

/// Abstraction over persistence backends capable of storing sale records.
///
/// Implementations assign `id` (monotonic, never reused) and `created_at` on insert.
pub trait SaleStore: Send + Sync {
    /// Every record, newest order date first, then newest `created_at` first.
    fn fetch_all(&self) -> Result<Vec<SaleRecord>, CoreError>;
    fn fetch(&self, id: SaleId) -> Result<Option<SaleRecord>, CoreError>;
    fn insert(&self, sale: ValidatedSale) -> Result<SaleRecord, CoreError>;
    /// Replaces the mutable fields of `id`. Returns `None` when the id is unknown.
    fn update(&self, id: SaleId, sale: ValidatedSale) -> Result<Option<SaleRecord>, CoreError>;
    /// Returns `false` when the id is unknown; the store is left untouched.
    fn delete(&self, id: SaleId) -> Result<bool, CoreError>;
}

/// Orders records the way [`SaleStore::fetch_all`] must return them.
pub fn sort_newest_first(records: &mut [SaleRecord]) {
    records.sort_by(|a, b| {
        b.order_date
            .cmp(&a.order_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: SaleId,
    records: Vec<SaleRecord>,
}

/// Volatile store used by tests and dry runs.
pub struct MemorySaleStore {
    state: Mutex<MemoryState>,
    clock: Arc<dyn Clock>,
}

impl MemorySaleStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_id: 1,
                records: Vec::new(),
            }),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, CoreError> {
        self.state
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }
}

impl SaleStore for MemorySaleStore {
    fn fetch_all(&self) -> Result<Vec<SaleRecord>, CoreError> {
        let mut records = self.lock()?.records.clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn fetch(&self, id: SaleId) -> Result<Option<SaleRecord>, CoreError> {
        Ok(self.lock()?.records.iter().find(|r| r.id == id).cloned())
    }

    fn insert(&self, sale: ValidatedSale) -> Result<SaleRecord, CoreError> {
        let mut state = self.lock()?;
        let id = state.next_id;
        state.next_id += 1;
        let record = sale.into_record(id, self.clock.now());
        state.records.push(record.clone());
        Ok(record)
    }

    fn update(&self, id: SaleId, sale: ValidatedSale) -> Result<Option<SaleRecord>, CoreError> {
        let mut state = self.lock()?;
        let Some(slot) = state.records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        *slot = sale.into_record(id, slot.created_at);
        Ok(Some(slot.clone()))
    }

    fn delete(&self, id: SaleId) -> Result<bool, CoreError> {
        let mut state = self.lock()?;
        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        Ok(state.records.len() != before)
    }
}
