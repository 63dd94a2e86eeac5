use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use models::tuan;

use crate::errors::ServiceError;
use crate::pagination::{Page, QueryOptions, SortOrder};
use crate::tuan::domain::{resolve_sort, Tuan, TuanFilter, TuanSortField};
use crate::tuan::repository::TuanRepository;

/// Postgres-backed repository; filters, ordering and paging run in SQL.
pub struct SeaOrmTuanRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTuanRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn db_err(e: DbErr) -> ServiceError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
        return ServiceError::email_taken();
    }
    ServiceError::Db(e.to_string())
}

fn column(field: TuanSortField) -> tuan::Column {
    match field {
        TuanSortField::Name => tuan::Column::Name,
        TuanSortField::Email => tuan::Column::Email,
        TuanSortField::Role => tuan::Column::Role,
        TuanSortField::CreatedAt => tuan::Column::CreatedAt,
        TuanSortField::UpdatedAt => tuan::Column::UpdatedAt,
    }
}

impl TryFrom<tuan::Model> for Tuan {
    type Error = ServiceError;

    fn try_from(m: tuan::Model) -> Result<Self, Self::Error> {
        let role = m.role.parse().map_err(|_| ServiceError::Db(format!("tuan {} has unknown role `{}`", m.id, m.role)))?;
        Ok(Tuan {
            id: m.id,
            name: m.name,
            email: m.email,
            role,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        })
    }
}

fn active_model(t: &Tuan) -> tuan::ActiveModel {
    tuan::ActiveModel {
        id: Set(t.id),
        name: Set(t.name.clone()),
        email: Set(t.email.clone()),
        role: Set(t.role.as_str().to_string()),
        created_at: Set(t.created_at.into()),
        updated_at: Set(t.updated_at.into()),
    }
}

#[async_trait]
impl TuanRepository for SeaOrmTuanRepository {
    async fn is_email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
        let mut finder = tuan::Entity::find().filter(tuan::Column::Email.eq(email));
        if let Some(id) = exclude {
            finder = finder.filter(tuan::Column::Id.ne(id));
        }
        let n = finder.count(&self.db).await.map_err(db_err)?;
        Ok(n > 0)
    }

    async fn insert(&self, t: Tuan) -> Result<Tuan, ServiceError> {
        let created = active_model(&t).insert(&self.db).await.map_err(db_err)?;
        created.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tuan>, ServiceError> {
        let found = tuan::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        found.map(Tuan::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Tuan>, ServiceError> {
        let found = tuan::Entity::find()
            .filter(tuan::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        found.map(Tuan::try_from).transpose()
    }

    async fn paginate(&self, filter: &TuanFilter, options: &QueryOptions) -> Result<Page<Tuan>, ServiceError> {
        let window = options.pagination();

        let mut select = tuan::Entity::find();
        if let Some(name) = &filter.name {
            select = select.filter(tuan::Column::Name.eq(name.as_str()));
        }
        if let Some(role) = &filter.role {
            select = select.filter(tuan::Column::Role.eq(role.as_str()));
        }
        let total = select.clone().count(&self.db).await.map_err(db_err)?;
        if window.is_past_end(total) {
            return Ok(Page::new(Vec::new(), window, total));
        }

        for (field, order) in resolve_sort(&options.sort_keys()) {
            let order = match order {
                SortOrder::Asc => Order::Asc,
                SortOrder::Desc => Order::Desc,
            };
            select = select.order_by(column(field), order);
        }
        // tie-break for stable pages
        let rows = select
            .order_by(tuan::Column::Id, Order::Asc)
            .offset(window.offset())
            .limit(window.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let results = rows.into_iter().map(Tuan::try_from).collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(results, window, total))
    }

    async fn save(&self, t: Tuan) -> Result<Tuan, ServiceError> {
        match active_model(&t).update(&self.db).await {
            Ok(updated) => updated.try_into(),
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found("Tuan")),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = tuan::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }
}
