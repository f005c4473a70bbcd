//! Contact entity and store inputs

use serde::{Deserialize, Serialize};

/// A persisted contact row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Name and email for a contact that has no id yet, or the new values
/// applied by an update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
}

impl NewContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Equality filter for [`ContactStore::fetch_by_filter`](super::ContactStore::fetch_by_filter)
///
/// Empty strings count as absent. When both fields are set, `name` is used
/// and `email` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// The single column a filter resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField<'a> {
    Name(&'a str),
    Email(&'a str),
}

impl ContactFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: Some(email.into()),
        }
    }

    /// Resolve which column to match on. Name wins over email.
    pub fn field(&self) -> Option<FilterField<'_>> {
        let name = self.name.as_deref().filter(|s| !s.is_empty());
        let email = self.email.as_deref().filter(|s| !s.is_empty());
        match (name, email) {
            (Some(name), _) => Some(FilterField::Name(name)),
            (None, Some(email)) => Some(FilterField::Email(email)),
            (None, None) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.field().is_none()
    }
}
