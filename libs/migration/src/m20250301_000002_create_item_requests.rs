use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_users::Users;
use crate::pk_id;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemRequests::Table)
                    .if_not_exists()
                    .col(pk_id(ItemRequests::Id))
                    .col(string_len(ItemRequests::Description, 512))
                    .col(big_integer(ItemRequests::AuthorId))
                    .col(timestamp(ItemRequests::Created).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_requests_author_id")
                            .from(ItemRequests::Table, ItemRequests::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing is always "by author" or "everyone but author", newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_item_requests_author_created")
                    .table(ItemRequests::Table)
                    .col(ItemRequests::AuthorId)
                    .col(ItemRequests::Created)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItemRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum ItemRequests {
    Table,
    Id,
    Description,
    AuthorId,
    Created,
}
