use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::session::SessionSettings as DomainSessionSettings;
use crate::domain::types::{ApiKey, MessageTemplate};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(primary_key(session_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for a browser session row.
pub struct Session {
    pub session_key: String,
    pub api_key: Option<String>,
    pub message_template: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
/// Insertable form of [`Session`].
pub struct NewSession<'a> {
    pub session_key: &'a str,
    pub api_key: Option<&'a str>,
    pub message_template: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating the settings of a [`Session`].
pub struct UpdateSession<'a> {
    pub api_key: Option<&'a str>,
    pub message_template: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl<'a> UpdateSession<'a> {
    pub fn from_domain(settings: &'a DomainSessionSettings, updated_at: NaiveDateTime) -> Self {
        Self {
            api_key: settings.api_key.as_ref().map(ApiKey::as_str),
            message_template: Some(settings.message_template.as_str()),
            updated_at,
        }
    }
}

impl From<Session> for DomainSessionSettings {
    /// Blank or missing columns fall back to the defaults.
    fn from(session: Session) -> Self {
        Self {
            api_key: session.api_key.and_then(|key| ApiKey::new(key).ok()),
            message_template: MessageTemplate::or_default(session.message_template.as_deref()),
        }
    }
}
