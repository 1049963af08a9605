use super::Dto;
use crate::model::{same_identity, User};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PartialEq for UserDto {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || same_identity(self.id, other.id)
    }
}

impl Dto for UserDto {
    type Entity = User;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn from_entity(e: &User) -> Self {
        UserDto {
            id: e.id,
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
        }
    }

    fn into_entity(self) -> User {
        User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }

    fn merge_into(self, e: &mut User) {
        if let Some(v) = self.id {
            e.id = Some(v);
        }
        if let Some(v) = self.first_name {
            e.first_name = Some(v);
        }
        if let Some(v) = self.last_name {
            e.last_name = Some(v);
        }
    }
}
