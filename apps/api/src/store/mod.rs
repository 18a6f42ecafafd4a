//! Record store boundary. The engine only ever reads the full collection and
//! writes whole records; everything derived from records is recomputed by the
//! insight modules on demand.

pub mod pg;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::record::Record;

/// Injected repository interface over the external record store.
///
/// Create/read plus the one permitted mutation: attaching a generated
/// illustration after the fact. Deletion is not this service's concern.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every record in insertion order. Encounter order matters: the
    /// aggregation tie-break rules depend on it.
    async fn get_all(&self) -> Result<Vec<Record>, AppError>;

    async fn get(&self, id: &str) -> Result<Option<Record>, AppError>;

    async fn save(&self, record: &Record) -> Result<(), AppError>;

    /// Appends an illustration URL to the record's images. Returns `false`
    /// when no record with `id` exists.
    async fn attach_illustration(&self, id: &str, image_url: &str) -> Result<bool, AppError>;
}
