//! Executes joined selects and maps each row into the primary entity plus its relation views.

use crate::db::{Database, RawRow};
use crate::error::AppError;
use crate::mapping::{map_entity, map_record};
use crate::model::Entity;
use crate::sql::{select_with_joins, Condition, PageRequest, ENTITY_ALIAS};
use std::sync::Arc;

#[derive(Clone)]
pub struct EntityManager {
    db: Arc<dyn Database>,
}

impl EntityManager {
    pub fn new(db: Arc<dyn Database>) -> Self {
        EntityManager { db }
    }

    /// One statement; one entity per returned row, in store order.
    pub async fn select<E: Entity>(
        &self,
        condition: Option<&Condition>,
        page: Option<&PageRequest>,
    ) -> Result<Vec<E>, AppError> {
        let q = select_with_joins(E::descriptor(), condition, page);
        let rows = self.db.fetch_all(&q).await?;
        rows.iter().map(process::<E>).collect()
    }

    pub async fn select_one<E: Entity>(&self, condition: &Condition) -> Result<Option<E>, AppError> {
        Ok(self.select(Some(condition), None).await?.into_iter().next())
    }
}

fn process<E: Entity>(row: &RawRow) -> Result<E, AppError> {
    let mut entity: E = map_entity(row, ENTITY_ALIAS)?;
    for rel in E::descriptor().relations {
        let record = map_record(row, rel.target, rel.name)?;
        entity.attach_relation(rel.name, record);
    }
    Ok(entity)
}
