use serde::{Deserialize, Serialize};

use super::record::{Entity, FieldValue, Record};

/// A place questions are asked about.
///
/// `(country_code, state, postcode, suburb)` is a natural key: no two rows
/// share all four values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: i32,
    pub country_code: String,
    pub state: String,
    pub postcode: String,
    pub suburb: String,
}

/// Insert draft for a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    pub country_code: String,
    pub state: String,
    pub postcode: String,
    pub suburb: String,
}

impl NewLocation {
    pub fn into_location(self, id: i32) -> Location {
        Location {
            id,
            country_code: self.country_code,
            state: self.state,
            postcode: self.postcode,
            suburb: self.suburb,
        }
    }
}

impl Record for NewLocation {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("country_code", FieldValue::Text(self.country_code.clone())),
            ("state", FieldValue::Text(self.state.clone())),
            ("postcode", FieldValue::Text(self.postcode.clone())),
            ("suburb", FieldValue::Text(self.suburb.clone())),
        ]
    }
}

impl Record for Location {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", FieldValue::Int(self.id)),
            ("country_code", FieldValue::Text(self.country_code.clone())),
            ("state", FieldValue::Text(self.state.clone())),
            ("postcode", FieldValue::Text(self.postcode.clone())),
            ("suburb", FieldValue::Text(self.suburb.clone())),
        ]
    }
}

impl Entity for Location {
    type Id = i32;
    type Draft = NewLocation;
    const NAME: &'static str = "Location";

    fn id(&self) -> i32 {
        self.id
    }
}
