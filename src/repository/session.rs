use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{session::SessionSettings, types::SessionKey},
    models::session::{NewSession, Session as DbSession, UpdateSession},
    repository::{DieselRepository, SessionReader, SessionWriter, errors::RepositoryResult},
    schema::sessions,
};

/// Inserts an empty row for the session unless one already exists.
pub(crate) fn ensure_session(conn: &mut SqliteConnection, key: &str) -> QueryResult<usize> {
    let now = Utc::now().naive_utc();
    diesel::insert_or_ignore_into(sessions::table)
        .values(&NewSession {
            session_key: key,
            api_key: None,
            message_template: None,
            created_at: now,
            updated_at: now,
        })
        .execute(conn)
}

impl SessionReader for DieselRepository {
    fn get_session_settings(&self, key: &SessionKey) -> RepositoryResult<Option<SessionSettings>> {
        let mut conn = self.conn()?;

        let session = sessions::table
            .find(key.to_string())
            .select(DbSession::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(session.map(Into::into))
    }
}

impl SessionWriter for DieselRepository {
    fn save_session_settings(
        &self,
        key: &SessionKey,
        settings: &SessionSettings,
    ) -> RepositoryResult<SessionSettings> {
        let mut conn = self.conn()?;
        let key = key.to_string();

        let updated = conn.transaction::<DbSession, diesel::result::Error, _>(|conn| {
            ensure_session(conn, &key)?;
            diesel::update(sessions::table.find(key.as_str()))
                .set(&UpdateSession::from_domain(settings, Utc::now().naive_utc()))
                .returning(DbSession::as_returning())
                .get_result(conn)
        })?;

        Ok(updated.into())
    }
}
