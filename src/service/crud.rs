//! Generic CRUD service: DTO mapping on top of [`Repository`].

use super::Repository;
use crate::db::Database;
use crate::dto::Dto;
use crate::error::AppError;
use crate::model::Entity;
use crate::sql::PageRequest;
use std::sync::Arc;

pub struct CrudService<D: Dto> {
    repository: Repository<D::Entity>,
}

impl<D: Dto> CrudService<D> {
    pub fn new(db: Arc<dyn Database>) -> Self {
        CrudService {
            repository: Repository::new(db),
        }
    }

    pub fn entity_name() -> &'static str {
        D::Entity::descriptor().entity_name
    }

    /// Insert a new entity; the returned DTO carries the generated id.
    pub async fn save(&self, dto: D) -> Result<D, AppError> {
        tracing::debug!(entity = Self::entity_name(), "request to save");
        let saved = self
            .repository
            .save(dto.into_entity())
            .await?
            .ok_or_else(|| AppError::not_found(Self::entity_name(), "idnotfound"))?;
        Ok(D::from_entity(&saved))
    }

    /// Full replacement by id. `None` when no such row.
    pub async fn update(&self, dto: D) -> Result<Option<D>, AppError> {
        tracing::debug!(entity = Self::entity_name(), id = ?dto.id(), "request to update");
        let saved = self.repository.save(dto.into_entity()).await?;
        Ok(saved.as_ref().map(D::from_entity))
    }

    /// Merge the non-null fields of `dto` into the stored entity. `None` when no such row.
    pub async fn partial_update(&self, dto: D) -> Result<Option<D>, AppError> {
        tracing::debug!(entity = Self::entity_name(), id = ?dto.id(), "request to partially update");
        let Some(id) = dto.id() else {
            return Ok(None);
        };
        let Some(mut existing) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        dto.merge_into(&mut existing);
        let saved = self.repository.save(existing).await?;
        Ok(saved.as_ref().map(D::from_entity))
    }

    pub async fn find_all(&self, page: &PageRequest) -> Result<Vec<D>, AppError> {
        tracing::debug!(entity = Self::entity_name(), page = page.page, size = page.size, "request to get all");
        let rows = self.repository.find_all(page).await?;
        Ok(rows.iter().map(D::from_entity).collect())
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<D>, AppError> {
        tracing::debug!(entity = Self::entity_name(), id, "request to get");
        let row = self.repository.find_by_id(id).await?;
        Ok(row.as_ref().map(D::from_entity))
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        self.repository.exists_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        tracing::debug!(entity = Self::entity_name(), id, "request to delete");
        self.repository.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{InMemoryDatabase, RawRow};
    use crate::dto::{IdRef, TagDto};
    use crate::sql::SqlValue;

    fn stored_tag() -> RawRow {
        RawRow::new()
            .with("e_id", 6i64)
            .with("e_tag", "classic")
            .with("e_timestamp", 50i64)
            .with("e_user_id", 1i64)
            .with("e_movie_id", 2i64)
    }

    #[tokio::test]
    async fn partial_update_merges_into_stored_row() {
        let db = Arc::new(InMemoryDatabase::new().with_rows(vec![stored_tag()]).with_affected(1));
        let service = CrudService::<TagDto>::new(db.clone());
        let patch = TagDto {
            id: Some(6),
            tag: Some("cult".into()),
            ..Default::default()
        };
        let updated = service.partial_update(patch).await.unwrap().unwrap();
        assert_eq!(updated.tag.as_deref(), Some("cult"));
        assert_eq!(updated.timestamp, Some(50));
        assert_eq!(updated.users, Some(IdRef::new(1)));

        let update = db.last_query().unwrap();
        assert!(update.sql.starts_with("UPDATE \"tags\""));
        assert_eq!(update.params[0], SqlValue::Text("cult".into()));
    }

    #[tokio::test]
    async fn partial_update_of_missing_row_is_none() {
        let db = Arc::new(InMemoryDatabase::new());
        let service = CrudService::<TagDto>::new(db.clone());
        let patch = TagDto {
            id: Some(99),
            ..Default::default()
        };
        assert!(service.partial_update(patch).await.unwrap().is_none());
        assert_eq!(db.query_count(), 1);
    }
}
