use super::descriptor::{ColumnDescriptor, ColumnType, EntityDescriptor, RelationDescriptor};
use super::movie::MOVIES;
use super::user::USERS;
use super::{same_identity, Entity, Movie, Record, User};

pub static RATINGS: EntityDescriptor = EntityDescriptor {
    table: "ratings",
    entity_name: "larisChatbotAssistantRatings",
    columns: &[
        ColumnDescriptor {
            name: "id",
            property: "id",
            column_type: ColumnType::BigInt,
            required: false,
            primary_key: true,
        },
        ColumnDescriptor {
            name: "rating",
            property: "rating",
            column_type: ColumnType::Double,
            required: true,
            primary_key: false,
        },
        // Epoch seconds.
        ColumnDescriptor {
            name: "timestamp",
            property: "timestamp",
            column_type: ColumnType::BigInt,
            required: true,
            primary_key: false,
        },
        ColumnDescriptor {
            name: "user_id",
            property: "userId",
            column_type: ColumnType::BigInt,
            required: false,
            primary_key: false,
        },
        ColumnDescriptor {
            name: "movie_id",
            property: "movieId",
            column_type: ColumnType::BigInt,
            required: false,
            primary_key: false,
        },
    ],
    relations: &[
        RelationDescriptor {
            name: "users",
            fk_column: "user_id",
            target: &USERS,
        },
        RelationDescriptor {
            name: "movies",
            fk_column: "movie_id",
            target: &MOVIES,
        },
    ],
};

/// A user's score for a movie.
///
/// `user` and `movie` are projection views filled in by joined selects; only
/// `user_id` / `movie_id` are persisted, and writing a view never touches them.
#[derive(Clone, Debug, Default)]
pub struct Rating {
    pub id: Option<i64>,
    pub rating: Option<f64>,
    pub timestamp: Option<i64>,
    pub user_id: Option<i64>,
    pub movie_id: Option<i64>,
    pub user: Option<User>,
    pub movie: Option<Movie>,
}

impl PartialEq for Rating {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || same_identity(self.id, other.id)
    }
}

impl Entity for Rating {
    fn descriptor() -> &'static EntityDescriptor {
        &RATINGS
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_record(mut record: Record) -> Self {
        Rating {
            id: record.take_i64("id"),
            rating: record.take_f64("rating"),
            timestamp: record.take_i64("timestamp"),
            user_id: record.take_i64("user_id"),
            movie_id: record.take_i64("movie_id"),
            user: None,
            movie: None,
        }
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("rating", self.rating)
            .with("timestamp", self.timestamp)
            .with("user_id", self.user_id)
            .with("movie_id", self.movie_id)
    }

    fn attach_relation(&mut self, relation: &str, record: Record) {
        match relation {
            "users" => self.user = Some(User::from_record(record)).filter(|u| u.id.is_some()),
            "movies" => self.movie = Some(Movie::from_record(record)).filter(|m| m.id.is_some()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attached_views_leave_foreign_keys_alone() {
        let mut rating = Rating {
            id: Some(1),
            user_id: Some(7),
            ..Default::default()
        };
        rating.attach_relation(
            "users",
            Record::new()
                .with("id", 9i64)
                .with("first_name", "Ada")
                .with("last_name", "Lovelace"),
        );
        assert_eq!(rating.user.as_ref().and_then(|u| u.first_name.as_deref()), Some("Ada"));
        assert_eq!(rating.user_id, Some(7));
    }

    #[test]
    fn null_joined_side_maps_to_absent_view() {
        let mut rating = Rating::default();
        rating.attach_relation("movies", Record::new().with("id", None::<i64>));
        assert!(rating.movie.is_none());
    }
}
