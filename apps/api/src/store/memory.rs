use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::record::Record;
use crate::store::RecordStore;

/// In-memory record store used by handler-level tests.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryRecordStore {
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get_all(&self) -> Result<Vec<Record>, AppError> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Record>, AppError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn save(&self, record: &Record) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }

    async fn attach_illustration(&self, id: &str, image_url: &str) -> Result<bool, AppError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.images.push(image_url.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
