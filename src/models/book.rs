//! Book model and related types.
//!
//! The `available` flag is derived state: it must equal `copies > 0`
//! after every mutation. Use [`derive_available`] whenever `copies`
//! changes; client-supplied values are never authoritative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book genre classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "genre", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    Fiction,
    NonFiction,
    Science,
    History,
    Biography,
    Fantasy,
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Genre::Fiction => "FICTION",
            Genre::NonFiction => "NON_FICTION",
            Genre::Science => "SCIENCE",
            Genre::History => "HISTORY",
            Genre::Biography => "BIOGRAPHY",
            Genre::Fantasy => "FANTASY",
        };
        write!(f, "{}", label)
    }
}

/// Full book model (DB + API)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub isbn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub copies: i32,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    pub genre: Genre,
    #[validate(length(min = 1, message = "isbn is required"))]
    pub isbn: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "copies must be a non-negative integer"))]
    pub copies: i32,
    /// Accepted on the wire but ignored; availability is derived from copies.
    #[serde(default)]
    pub available: Option<bool>,
}

/// Partial update request. Absent fields keep their current values;
/// present fields pass the same constraints as on create.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: Option<String>,
    pub genre: Option<Genre>,
    #[validate(length(min = 1, message = "isbn is required"))]
    pub isbn: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "copies must be a non-negative integer"))]
    pub copies: Option<i32>,
    /// Accepted on the wire but ignored; availability is derived from copies.
    pub available: Option<bool>,
}

/// Book list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    /// Genre equality filter (the only supported filter key)
    pub filter: Option<String>,
    /// Sort field, default `createdAt`
    pub sort_by: Option<String>,
    /// `asc` for ascending, anything else descending
    pub sort: Option<String>,
    /// Maximum number of books returned, default 10
    pub limit: Option<i64>,
}

/// Availability rule shared by every copies-mutating flow.
pub fn derive_available(copies: i32) -> bool {
    copies > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn availability_follows_stock() {
        assert!(!derive_available(0));
        assert!(derive_available(1));
        assert!(derive_available(250));
        assert!(!derive_available(-1));
    }

    #[test]
    fn genre_uses_upper_snake_wire_format() {
        let json = serde_json::to_string(&Genre::NonFiction).unwrap();
        assert_eq!(json, "\"NON_FICTION\"");
        let back: Genre = serde_json::from_str("\"FANTASY\"").unwrap();
        assert_eq!(back, Genre::Fantasy);
    }

    #[test]
    fn create_rejects_negative_copies() {
        let payload = CreateBook {
            title: "Matilda".into(),
            author: "Roald Dahl".into(),
            genre: Genre::Fiction,
            isbn: "9780140328721".into(),
            description: None,
            copies: -2,
            available: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("copies"));
    }

    #[test]
    fn update_validates_only_present_fields() {
        let payload = UpdateBook {
            copies: Some(4),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());

        let payload = UpdateBook {
            isbn: Some(String::new()),
            ..Default::default()
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("isbn"));
    }

    #[test]
    fn query_params_parse_camel_case() {
        let query: BookQuery =
            serde_json::from_str(r#"{"filter":"FANTASY","sortBy":"title","sort":"asc","limit":5}"#)
                .unwrap();
        assert_eq!(query.filter.as_deref(), Some("FANTASY"));
        assert_eq!(query.sort_by.as_deref(), Some("title"));
        assert_eq!(query.limit, Some(5));
    }
}
