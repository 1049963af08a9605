//! Generic repository: single-table writes plus joined reads through the entity manager.

use super::EntityManager;
use crate::db::Database;
use crate::error::AppError;
use crate::mapping::ColumnConverter;
use crate::model::Entity;
use crate::sql::{self, Condition, PageRequest};
use std::marker::PhantomData;
use std::sync::Arc;

pub struct Repository<E> {
    db: Arc<dyn Database>,
    entity_manager: EntityManager,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Repository {
            db: self.db.clone(),
            entity_manager: self.entity_manager.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Repository {
            entity_manager: EntityManager::new(db.clone()),
            db,
            _marker: PhantomData,
        }
    }

    pub async fn find_all(&self, page: &PageRequest) -> Result<Vec<E>, AppError> {
        self.entity_manager.select(None, Some(page)).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<E>, AppError> {
        self.entity_manager.select_one(&Condition::IdEquals(id)).await
    }

    /// Rows whose foreign key for `relation` equals `id`.
    pub async fn find_by_relation(&self, relation: &str, id: i64) -> Result<Vec<E>, AppError> {
        let column = self.fk_column(relation)?;
        let condition = Condition::Equals {
            column,
            value: id.into(),
        };
        self.entity_manager.select(Some(&condition), None).await
    }

    /// Rows with no foreign key set for `relation`.
    pub async fn find_where_relation_is_null(&self, relation: &str) -> Result<Vec<E>, AppError> {
        let column = self.fk_column(relation)?;
        self.entity_manager
            .select(Some(&Condition::IsNull { column }), None)
            .await
    }

    /// Insert when the entity has no id, otherwise update by id.
    /// `None` means the update matched no row.
    pub async fn save(&self, entity: E) -> Result<Option<E>, AppError> {
        match entity.id() {
            None => self.insert(entity).await.map(Some),
            Some(id) => self.update(id, entity).await,
        }
    }

    async fn insert(&self, mut entity: E) -> Result<E, AppError> {
        let q = sql::insert(E::descriptor(), &entity.to_record());
        let row = self
            .db
            .fetch_optional(&q)
            .await?
            .ok_or(AppError::MissingGeneratedId(E::descriptor().table))?;
        let id = ColumnConverter::get::<i64>(&row, "id")?.ok_or(AppError::MissingGeneratedId(E::descriptor().table))?;
        entity.set_id(id);
        Ok(entity)
    }

    async fn update(&self, id: i64, entity: E) -> Result<Option<E>, AppError> {
        let q = sql::update(E::descriptor(), id, &entity.to_record());
        let affected = self.db.execute(&q).await?;
        Ok((affected > 0).then_some(entity))
    }

    /// Hard delete. Deleting a missing id is not an error.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let q = sql::delete(E::descriptor(), id);
        self.db.execute(&q).await?;
        Ok(())
    }

    pub async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let q = sql::exists_by_id(E::descriptor(), id);
        Ok(self.db.fetch_optional(&q).await?.is_some())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let q = sql::count(E::descriptor());
        let row = self.db.fetch_optional(&q).await?;
        match row {
            Some(row) => Ok(ColumnConverter::get::<i64>(&row, "count")?.unwrap_or(0)),
            None => Ok(0),
        }
    }

    fn fk_column(&self, relation: &str) -> Result<&'static str, AppError> {
        let descriptor = E::descriptor();
        descriptor
            .relation(relation)
            .map(|r| r.fk_column)
            .ok_or_else(|| {
                AppError::bad_request(
                    descriptor.entity_name,
                    "relationinvalid",
                    format!("unknown relation: {}", relation),
                )
            })
    }
}
