use serde::{Deserialize, Serialize};

use super::record::{FieldValue, Record};

/// Country reference data, keyed by its two-letter ISO code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl Country {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl Record for Country {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("code", FieldValue::Text(self.code.clone())),
            ("name", FieldValue::Text(self.name.clone())),
        ]
    }
}
