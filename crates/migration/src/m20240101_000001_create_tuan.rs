//! Create `tuan` table.
//!
//! `email` carries a unique constraint so concurrent creates cannot both land.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tuan::Table)
                    .if_not_exists()
                    .col(uuid(Tuan::Id).primary_key())
                    .col(string_len(Tuan::Name, 128).not_null())
                    .col(string_len(Tuan::Email, 255).unique_key().not_null())
                    .col(string_len(Tuan::Role, 32).not_null())
                    .col(timestamp_with_time_zone(Tuan::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Tuan::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tuan::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tuan { Table, Id, Name, Email, Role, CreatedAt, UpdatedAt }
