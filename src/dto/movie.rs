use super::Dto;
use crate::model::{same_identity, Movie};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDto {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub genres: Option<String>,
}

impl PartialEq for MovieDto {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || same_identity(self.id, other.id)
    }
}

impl Dto for MovieDto {
    type Entity = Movie;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn from_entity(e: &Movie) -> Self {
        MovieDto {
            id: e.id,
            title: e.title.clone(),
            genres: e.genres.clone(),
        }
    }

    fn into_entity(self) -> Movie {
        Movie {
            id: self.id,
            title: self.title,
            genres: self.genres,
        }
    }

    fn merge_into(self, e: &mut Movie) {
        if let Some(v) = self.id {
            e.id = Some(v);
        }
        if let Some(v) = self.title {
            e.title = Some(v);
        }
        if let Some(v) = self.genres {
            e.genres = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_round_trip_keeps_fields() {
        let movie = Movie {
            id: Some(3),
            title: Some("title1".into()),
            genres: Some("genres1".into()),
        };
        let back = MovieDto::from_entity(&movie).into_entity();
        assert_eq!(back.id, Some(3));
        assert_eq!(back.title.as_deref(), Some("title1"));
        assert_eq!(back.genres.as_deref(), Some("genres1"));
    }

    #[test]
    fn dto_equality_follows_id() {
        let a = MovieDto {
            id: Some(1),
            ..Default::default()
        };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.id = Some(2);
        assert_ne!(a, b);
        assert_ne!(MovieDto::default(), MovieDto::default());
        let unsaved = MovieDto::default();
        assert!(unsaved.eq(&unsaved));
    }
}
