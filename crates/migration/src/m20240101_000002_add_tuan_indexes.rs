use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // List filters narrow on role and name
        manager
            .create_index(
                Index::create()
                    .name("idx_tuan_role")
                    .table(Tuan::Table)
                    .col(Tuan::Role)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tuan_name")
                    .table(Tuan::Table)
                    .col(Tuan::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Default list ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_tuan_created_at")
                    .table(Tuan::Table)
                    .col(Tuan::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in ["idx_tuan_created_at", "idx_tuan_name", "idx_tuan_role"] {
            manager
                .drop_index(Index::drop().name(name).table(Tuan::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tuan { Table, Name, Role, CreatedAt }
