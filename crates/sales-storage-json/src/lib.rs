use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use sales_core::{
    storage::{sort_newest_first, SaleStore},
    time::Clock,
    validation::check_record,
    CoreError, ValidatedSale,
};
use sales_domain::{SaleId, SaleRecord};
use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;
const TMP_SUFFIX: &str = "tmp";

/// On-disk layout of the sales data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesBook {
    pub schema_version: u32,
    /// Next id to hand out. Only ever grows, so deleted ids are never reused.
    pub next_id: SaleId,
    #[serde(default)]
    pub records: Vec<SaleRecord>,
}

impl Default for SalesBook {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            next_id: 1,
            records: Vec::new(),
        }
    }
}

/// Filesystem-backed JSON persistence for sale records.
///
/// Every call re-reads the file, and every mutation rewrites it through a
/// temporary file and a rename.
pub struct JsonSaleStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl JsonSaleStore {
    pub fn new(path: PathBuf, clock: Arc<dyn Clock>) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            clock,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, CoreError> {
        self.write_lock
            .lock()
            .map_err(|_| CoreError::Storage("sales file lock poisoned".into()))
    }

    fn read_book(&self) -> Result<SalesBook, CoreError> {
        load_book_from_path(&self.path)
    }

    fn write_book(&self, book: &SalesBook) -> Result<(), CoreError> {
        save_book_to_path(book, &self.path)
    }
}

impl SaleStore for JsonSaleStore {
    fn fetch_all(&self) -> Result<Vec<SaleRecord>, CoreError> {
        let mut records = self.read_book()?.records;
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn fetch(&self, id: SaleId) -> Result<Option<SaleRecord>, CoreError> {
        Ok(self.read_book()?.records.into_iter().find(|r| r.id == id))
    }

    fn insert(&self, sale: ValidatedSale) -> Result<SaleRecord, CoreError> {
        let _guard = self.lock()?;
        let mut book = self.read_book()?;
        let id = book.next_id;
        let record = sale.into_record(id, self.clock.now());
        check_record(&record)?;
        book.next_id = id + 1;
        book.records.push(record.clone());
        self.write_book(&book)?;
        tracing::debug!(id, path = %self.path.display(), "sale written");
        Ok(record)
    }

    fn update(&self, id: SaleId, sale: ValidatedSale) -> Result<Option<SaleRecord>, CoreError> {
        let _guard = self.lock()?;
        let mut book = self.read_book()?;
        let Some(slot) = book.records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        let record = sale.into_record(id, slot.created_at);
        check_record(&record)?;
        *slot = record.clone();
        self.write_book(&book)?;
        Ok(Some(record))
    }

    fn delete(&self, id: SaleId) -> Result<bool, CoreError> {
        let _guard = self.lock()?;
        let mut book = self.read_book()?;
        let before = book.records.len();
        book.records.retain(|r| r.id != id);
        if book.records.len() == before {
            return Ok(false);
        }
        self.write_book(&book)?;
        Ok(true)
    }
}

/// Loads and re-checks a sales file. A missing file is an empty book.
pub fn load_book_from_path(path: &Path) -> Result<SalesBook, CoreError> {
    if !path.exists() {
        return Ok(SalesBook::default());
    }
    let data = fs::read_to_string(path)?;
    let book: SalesBook =
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
    if book.schema_version > SCHEMA_VERSION {
        return Err(CoreError::Storage(format!(
            "sales file schema {} is newer than supported {}",
            book.schema_version, SCHEMA_VERSION
        )));
    }
    for record in &book.records {
        check_record(record).map_err(|err| {
            CoreError::Storage(format!("record #{} is invalid: {err}", record.id))
        })?;
        if record.id >= book.next_id {
            return Err(CoreError::Storage(format!(
                "record #{} is not below next id {}",
                record.id, book.next_id
            )));
        }
    }
    Ok(book)
}

/// Writes `book` to `path` through a temporary sibling file.
pub fn save_book_to_path(book: &SalesBook, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize_book(book)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

fn serialize_book(book: &SalesBook) -> Result<String, CoreError> {
    serde_json::to_string_pretty(book).map_err(|err| CoreError::Serde(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/data/sales.json")),
            PathBuf::from("/data/sales.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("sales")), PathBuf::from("sales.tmp"));
    }
}
