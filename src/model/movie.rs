use super::descriptor::{ColumnDescriptor, ColumnType, EntityDescriptor};
use super::{same_identity, Entity, Record};

pub static MOVIES: EntityDescriptor = EntityDescriptor {
    table: "movies",
    entity_name: "larisChatbotAssistantMovies",
    columns: &[
        ColumnDescriptor {
            name: "id",
            property: "id",
            column_type: ColumnType::BigInt,
            required: false,
            primary_key: true,
        },
        ColumnDescriptor {
            name: "title",
            property: "title",
            column_type: ColumnType::Text,
            required: true,
            primary_key: false,
        },
        // Free text, e.g. "Adventure|Comedy".
        ColumnDescriptor {
            name: "genres",
            property: "genres",
            column_type: ColumnType::Text,
            required: true,
            primary_key: false,
        },
    ],
    relations: &[],
};

#[derive(Clone, Debug, Default)]
pub struct Movie {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub genres: Option<String>,
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || same_identity(self.id, other.id)
    }
}

impl Entity for Movie {
    fn descriptor() -> &'static EntityDescriptor {
        &MOVIES
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_record(mut record: Record) -> Self {
        Movie {
            id: record.take_i64("id"),
            title: record.take_text("title"),
            genres: record.take_text("genres"),
        }
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("title", self.title.clone())
            .with("genres", self.genres.clone())
    }
}
