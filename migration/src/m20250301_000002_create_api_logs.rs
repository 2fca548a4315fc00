use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApiLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ApiLogs::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(ApiLogs::RequestId).string().not_null())
                    .col(ColumnDef::new(ApiLogs::Method).string().not_null())
                    .col(ColumnDef::new(ApiLogs::ActionName).string().not_null())
                    .col(ColumnDef::new(ApiLogs::Body).string().not_null())
                    .col(ColumnDef::new(ApiLogs::Claims).string().not_null())
                    .col(ColumnDef::new(ApiLogs::Subject).string().not_null())
                    .col(ColumnDef::new(ApiLogs::IpAddress).string())
                    .col(ColumnDef::new(ApiLogs::CollectedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_api_logs_subject")
                    .table(ApiLogs::Table)
                    .col(ApiLogs::Subject)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_api_logs_collected_at")
                    .table(ApiLogs::Table)
                    .col(ApiLogs::CollectedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApiLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ApiLogs {
    Table,
    Id,
    RequestId,
    Method,
    ActionName,
    Body,
    Claims,
    Subject,
    IpAddress,
    CollectedAt,
}
