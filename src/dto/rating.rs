use super::{Dto, IdRef};
use crate::model::{same_identity, Rating};
use serde::{Deserialize, Serialize};

/// Relations travel as id-only references; on write their id becomes the foreign key.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDto {
    pub id: Option<i64>,
    pub rating: Option<f64>,
    pub timestamp: Option<i64>,
    pub users: Option<IdRef>,
    pub movies: Option<IdRef>,
}

impl PartialEq for RatingDto {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || same_identity(self.id, other.id)
    }
}

impl Dto for RatingDto {
    type Entity = Rating;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn from_entity(e: &Rating) -> Self {
        RatingDto {
            id: e.id,
            rating: e.rating,
            timestamp: e.timestamp,
            users: e.user_id.map(IdRef::new),
            movies: e.movie_id.map(IdRef::new),
        }
    }

    fn into_entity(self) -> Rating {
        Rating {
            id: self.id,
            rating: self.rating,
            timestamp: self.timestamp,
            user_id: self.users.and_then(|r| r.id),
            movie_id: self.movies.and_then(|r| r.id),
            user: None,
            movie: None,
        }
    }

    fn merge_into(self, e: &mut Rating) {
        if let Some(v) = self.id {
            e.id = Some(v);
        }
        if let Some(v) = self.rating {
            e.rating = Some(v);
        }
        if let Some(v) = self.timestamp {
            e.timestamp = Some(v);
        }
        if let Some(r) = self.users {
            e.user_id = r.id;
        }
        if let Some(r) = self.movies {
            e.movie_id = r.id;
        }
    }
}
