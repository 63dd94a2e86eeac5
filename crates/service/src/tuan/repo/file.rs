use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::{Page, QueryOptions};
use crate::storage::json_collection::JsonCollection;
use crate::tuan::domain::{compare_by, resolve_sort, Tuan, TuanFilter};
use crate::tuan::repository::TuanRepository;

pub const COLLECTION_FILE: &str = "tuans.json";

/// Document-file repository: all Tuans in `<data_dir>/tuans.json`.
#[derive(Clone)]
pub struct FileTuanRepository {
    docs: Arc<JsonCollection<Uuid, Tuan>>,
}

impl FileTuanRepository {
    pub async fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, ServiceError> {
        let docs = JsonCollection::open(data_dir.as_ref().join(COLLECTION_FILE)).await?;
        Ok(Self { docs })
    }
}

#[async_trait]
impl TuanRepository for FileTuanRepository {
    async fn is_email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
        Ok(self.docs.any(|id, t| t.email == email && Some(*id) != exclude).await)
    }

    async fn insert(&self, tuan: Tuan) -> Result<Tuan, ServiceError> {
        self.docs.insert(tuan.id, tuan.clone()).await?;
        Ok(tuan)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tuan>, ServiceError> {
        Ok(self.docs.get(&id).await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Tuan>, ServiceError> {
        Ok(self.docs.find(|_, t| t.email == email).await)
    }

    async fn paginate(&self, filter: &TuanFilter, options: &QueryOptions) -> Result<Page<Tuan>, ServiceError> {
        let window = options.pagination();
        let sort = resolve_sort(&options.sort_keys());

        let mut matched: Vec<Tuan> = self.docs.values().await.into_iter().filter(|t| filter.matches(t)).collect();
        matched.sort_by(|a, b| compare_by(&sort, a, b));

        let total = matched.len() as u64;
        let results = matched
            .into_iter()
            .skip(usize::try_from(window.offset()).unwrap_or(usize::MAX))
            .take(window.limit as usize)
            .collect();
        Ok(Page::new(results, window, total))
    }

    async fn save(&self, tuan: Tuan) -> Result<Tuan, ServiceError> {
        if !self.docs.replace(&tuan.id, tuan.clone()).await? {
            return Err(ServiceError::not_found("Tuan"));
        }
        Ok(tuan)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.docs.remove(&id).await?.is_some())
    }
}
