use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Tuan, TuanFilter};
use crate::errors::ServiceError;
use crate::pagination::{Page, QueryOptions};

/// Persistence abstraction for Tuan documents.
///
/// Implementations own filtering, ordering and the page window; the service
/// never post-processes a page.
#[async_trait]
pub trait TuanRepository: Send + Sync {
    /// Whether `email` belongs to a document other than `exclude`.
    async fn is_email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError>;
    async fn insert(&self, tuan: Tuan) -> Result<Tuan, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tuan>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Tuan>, ServiceError>;
    async fn paginate(&self, filter: &TuanFilter, options: &QueryOptions) -> Result<Page<Tuan>, ServiceError>;
    /// Replace the stored document with the same id.
    async fn save(&self, tuan: Tuan) -> Result<Tuan, ServiceError>;
    /// Returns whether a document was removed.
    async fn remove(&self, id: Uuid) -> Result<bool, ServiceError>;
}
