use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{CreateTuanInput, Tuan, TuanFilter, UpdateTuanInput};
use super::repository::TuanRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, QueryOptions};

const ENTITY: &str = "Tuan";

/// Tuan business service independent of web framework and storage backend.
pub struct TuanService<R: TuanRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: TuanRepository + ?Sized> Clone for TuanService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: TuanRepository + ?Sized> TuanService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a Tuan after checking its email is unused.
    ///
    /// # Examples
    /// ```
    /// use service::tuan::{TuanService, repo::FileTuanRepository, domain::CreateTuanInput};
    /// use std::sync::Arc;
    /// let dir = std::env::temp_dir().join(format!("tuan_doc_{}", uuid::Uuid::new_v4()));
    /// let repo = tokio_test::block_on(FileTuanRepository::open(&dir)).unwrap();
    /// let svc = TuanService::new(Arc::new(repo));
    /// let input = CreateTuanInput { name: Some("A".into()), email: Some("a@x.com".into()), role: None };
    /// let created = tokio_test::block_on(svc.create(input.clone())).unwrap();
    /// assert_eq!(created.email, "a@x.com");
    /// assert!(tokio_test::block_on(svc.create(input)).is_err());
    /// ```
    #[instrument(skip(self, input), fields(email = ?input.email))]
    pub async fn create(&self, input: CreateTuanInput) -> Result<Tuan, ServiceError> {
        let new = input.validate()?;
        if self.repo.is_email_taken(&new.email, None).await? {
            debug!(email = %new.email, "email already taken");
            return Err(ServiceError::email_taken());
        }
        let created = self.repo.insert(new.into_document(Utc::now())).await?;
        info!(id = %created.id, email = %created.email, "tuan_created");
        Ok(created)
    }

    /// One page of Tuans; an empty match is an empty page.
    #[instrument(skip(self))]
    pub async fn query_list(&self, filter: TuanFilter, options: QueryOptions) -> Result<Page<Tuan>, ServiceError> {
        self.repo.paginate(&filter, &options).await
    }

    /// `None` when absent; callers decide whether that is an error.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Tuan>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Tuan>, ServiceError> {
        self.repo.find_by_email(&models::tuan::normalize_email(email)).await
    }

    /// Overlay the provided fields onto the stored Tuan and persist the copy.
    #[instrument(skip(self, input))]
    pub async fn update_by_id(&self, id: Uuid, input: UpdateTuanInput) -> Result<Tuan, ServiceError> {
        let patch = input.validate()?;
        let current = self.get_by_id(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))?;
        if let Some(email) = &patch.email {
            if self.repo.is_email_taken(email, Some(id)).await? {
                return Err(ServiceError::email_taken());
            }
        }
        let updated = self.repo.save(patch.apply(&current, Utc::now())).await?;
        info!(id = %updated.id, "tuan_updated");
        Ok(updated)
    }

    /// Remove a Tuan, returning it as it was just before removal.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: Uuid) -> Result<Tuan, ServiceError> {
        let current = self.get_by_id(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))?;
        if !self.repo.remove(id).await? {
            // removed concurrently between lookup and delete
            return Err(ServiceError::not_found(ENTITY));
        }
        info!(id = %id, "tuan_deleted");
        Ok(current)
    }
}
