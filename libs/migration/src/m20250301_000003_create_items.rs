use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_users::Users;
use crate::m20250301_000002_create_item_requests::ItemRequests;
use crate::pk_id;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(pk_id(Items::Id))
                    .col(string_len(Items::Name, 255))
                    .col(string_len(Items::Description, 512))
                    .col(boolean(Items::Available))
                    .col(big_integer(Items::OwnerId))
                    .col(big_integer_null(Items::RequestId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_owner_id")
                            .from(Items::Table, Items::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_request_id")
                            .from(Items::Table, Items::RequestId)
                            .to(ItemRequests::Table, ItemRequests::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_owner_id")
                    .table(Items::Table)
                    .col(Items::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_request_id")
                    .table(Items::Table)
                    .col(Items::RequestId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Items {
    Table,
    Id,
    Name,
    Description,
    Available,
    OwnerId,
    RequestId,
}
