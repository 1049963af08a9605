use super::{Dto, IdRef};
use crate::model::{same_identity, Tag};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: Option<i64>,
    pub tag: Option<String>,
    pub timestamp: Option<i64>,
    pub users: Option<IdRef>,
    pub movies: Option<IdRef>,
}

impl PartialEq for TagDto {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || same_identity(self.id, other.id)
    }
}

impl Dto for TagDto {
    type Entity = Tag;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn from_entity(e: &Tag) -> Self {
        TagDto {
            id: e.id,
            tag: e.tag.clone(),
            timestamp: e.timestamp,
            users: e.user_id.map(IdRef::new),
            movies: e.movie_id.map(IdRef::new),
        }
    }

    fn into_entity(self) -> Tag {
        Tag {
            id: self.id,
            tag: self.tag,
            timestamp: self.timestamp,
            user_id: self.users.and_then(|r| r.id),
            movie_id: self.movies.and_then(|r| r.id),
            user: None,
            movie: None,
        }
    }

    fn merge_into(self, e: &mut Tag) {
        if let Some(v) = self.id {
            e.id = Some(v);
        }
        if let Some(v) = self.tag {
            e.tag = Some(v);
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
