use serde::{Deserialize, Serialize};

use super::record::{Entity, FieldValue, Record};

/// User entity - owns questions, answers and recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

impl Record for NewUser {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("username", FieldValue::Text(self.username.clone())),
            ("email", FieldValue::Text(self.email.clone())),
            ("password_hash", FieldValue::Text(self.password_hash.clone())),
        ]
    }
}

impl Record for User {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", FieldValue::Int(self.id)),
            ("username", FieldValue::Text(self.username.clone())),
            ("email", FieldValue::Text(self.email.clone())),
            ("password_hash", FieldValue::Text(self.password_hash.clone())),
        ]
    }
}

impl Entity for User {
    type Id = i32;
    type Draft = NewUser;
    const NAME: &'static str = "User";

    fn id(&self) -> i32 {
        self.id
    }
}
