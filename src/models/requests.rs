//! Request bodies for the duties API

use serde::{Deserialize, Serialize};

/// Body of `POST /duties` and `PUT /duties/:id`.
///
/// `name` is optional at the wire level so a missing field reaches
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DutyPayload {
    #[serde(default)]
    pub name: Option<String>,
}

impl DutyPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Returns the name when present and non-empty.
    pub fn validated_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
