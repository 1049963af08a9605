use super::descriptor::{ColumnDescriptor, ColumnType, EntityDescriptor};
use super::{same_identity, Entity, Record};

pub static USERS: EntityDescriptor = EntityDescriptor {
    table: "users",
    entity_name: "larisChatbotAssistantUsers",
    columns: &[
        ColumnDescriptor {
            name: "id",
            property: "id",
            column_type: ColumnType::BigInt,
            required: false,
            primary_key: true,
        },
        ColumnDescriptor {
            name: "first_name",
            property: "firstName",
            column_type: ColumnType::Text,
            required: true,
            primary_key: false,
        },
        ColumnDescriptor {
            name: "last_name",
            property: "lastName",
            column_type: ColumnType::Text,
            required: true,
            primary_key: false,
        },
    ],
    relations: &[],
};

#[derive(Clone, Debug, Default)]
pub struct User {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || same_identity(self.id, other.id)
    }
}

impl Entity for User {
    fn descriptor() -> &'static EntityDescriptor {
        &USERS
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_record(mut record: Record) -> Self {
        User {
            id: record.take_i64("id"),
            first_name: record.take_text("first_name"),
            last_name: record.take_text("last_name"),
        }
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("first_name", self.first_name.clone())
            .with("last_name", self.last_name.clone())
    }
}
