pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_item_requests;
mod m20250301_000003_create_items;
mod m20250301_000004_create_bookings;
mod m20250301_000005_create_comments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_item_requests::Migration),
            Box::new(m20250301_000003_create_items::Migration),
            Box::new(m20250301_000004_create_bookings::Migration),
            Box::new(m20250301_000005_create_comments::Migration),
        ]
    }
}

/// `BIGINT` identity primary key shared by every ShareIt table.
pub(crate) fn pk_id<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}
