use super::descriptor::{ColumnDescriptor, ColumnType, EntityDescriptor, RelationDescriptor};
use super::movie::MOVIES;
use super::user::USERS;
use super::{same_identity, Entity, Movie, Record, User};

pub static TAGS: EntityDescriptor = EntityDescriptor {
    table: "tags",
    entity_name: "larisChatbotAssistantTags",
    columns: &[
        ColumnDescriptor {
            name: "id",
            property: "id",
            column_type: ColumnType::BigInt,
            required: false,
            primary_key: true,
        },
        ColumnDescriptor {
            name: "tag",
            property: "tag",
            column_type: ColumnType::Text,
            required: true,
            primary_key: false,
        },
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

/// Free-text label a user put on a movie. Same view rules as [`super::Rating`].
#[derive(Clone, Debug, Default)]
pub struct Tag {
    pub id: Option<i64>,
    pub tag: Option<String>,
    pub timestamp: Option<i64>,
    pub user_id: Option<i64>,
    pub movie_id: Option<i64>,
    pub user: Option<User>,
    pub movie: Option<Movie>,
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || same_identity(self.id, other.id)
    }
}

impl Entity for Tag {
    fn descriptor() -> &'static EntityDescriptor {
        &TAGS
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_record(mut record: Record) -> Self {
        Tag {
            id: record.take_i64("id"),
            tag: record.take_text("tag"),
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
            .with("tag", self.tag.clone())
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
