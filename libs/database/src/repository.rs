//! Generic CRUD helpers over a SeaORM entity keyed by a `BIGINT` identity column.
//!
//! Domain repositories wrap a `BaseRepository<Entity>` for the single-row
//! operations and drop down to `base.db()` for anything query-shaped.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait,
};
use std::marker::PhantomData;

pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i64>,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DbErr> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    pub async fn insert(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.insert(&self.db).await
    }

    pub async fn update(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.update(&self.db).await
    }

    /// Returns the number of deleted rows (0 or 1).
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, DbErr> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    mod tool {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
        #[sea_orm(table_name = "tools")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i64,
            pub name: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    #[tokio::test]
    async fn test_find_by_id_returns_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![tool::Model {
                id: 7,
                name: "drill".to_string(),
            }]])
            .into_connection();
        let repo = BaseRepository::<tool::Entity>::new(db);

        let found = repo.find_by_id(7).await.unwrap();
        assert_eq!(found.map(|m| m.name), Some("drill".to_string()));
    }

    #[tokio::test]
    async fn test_exists_is_false_for_empty_result() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<tool::Model>::new()])
            .into_connection();
        let repo = BaseRepository::<tool::Entity>::new(db);

        assert!(!repo.exists(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_by_id_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = BaseRepository::<tool::Entity>::new(db);

        assert_eq!(repo.delete_by_id(3).await.unwrap(), 1);
    }
}
