use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_users::Users;
use crate::m20250301_000003_create_items::Items;
use crate::pk_id;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(BookingStatus::Enum)
                    .values([
                        BookingStatus::Waiting,
                        BookingStatus::Approved,
                        BookingStatus::Rejected,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(pk_id(Bookings::Id))
                    .col(big_integer(Bookings::ItemId))
                    .col(big_integer(Bookings::BookerId))
                    .col(timestamp(Bookings::Start))
                    .col(timestamp(Bookings::End))
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .enumeration(
                                BookingStatus::Enum,
                                [
                                    BookingStatus::Waiting,
                                    BookingStatus::Approved,
                                    BookingStatus::Rejected,
                                ],
                            )
                            .not_null()
                            .default("WAITING"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_item_id")
                            .from(Bookings::Table, Bookings::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_booker_id")
                            .from(Bookings::Table, Bookings::BookerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_item_start")
                    .table(Bookings::Table)
                    .col(Bookings::ItemId)
                    .col(Bookings::Start)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_booker_start")
                    .table(Bookings::Table)
                    .col(Bookings::BookerId)
                    .col(Bookings::Start)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(BookingStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    ItemId,
    BookerId,
    Start,
    End,
    Status,
}

#[derive(DeriveIden)]
enum BookingStatus {
    #[sea_orm(iden = "booking_status")]
    Enum,
    #[sea_orm(iden = "WAITING")]
    Waiting,
    #[sea_orm(iden = "APPROVED")]
    Approved,
    #[sea_orm(iden = "REJECTED")]
    Rejected,
}
