//! Wire-format projections of the entities and the entity <-> DTO mapping.

mod movie;
mod rating;
mod tag;
mod user;

pub use movie::MovieDto;
pub use rating::RatingDto;
pub use tag::TagDto;
pub use user::UserDto;

use crate::model::Entity;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub trait Dto: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Entity: Entity;

    fn id(&self) -> Option<i64>;

    fn from_entity(entity: &Self::Entity) -> Self;

    fn into_entity(self) -> Self::Entity;

    /// Merge patch: only fields present in `self` overwrite `entity`.
    fn merge_into(self, entity: &mut Self::Entity);
}

/// Related entity embedded by id only, e.g. `"users": {"id": 3}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    #[serde(default)]
    pub id: Option<i64>,
}

impl IdRef {
    pub fn new(id: i64) -> Self {
        IdRef { id: Some(id) }
    }
}
