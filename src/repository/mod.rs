use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{lead_set::LeadSet, session::SessionSettings, types::SessionKey},
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod lead_set;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod session;

/// Diesel-backed repository over the SQLite pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait SessionReader {
    /// Returns the stored settings, or `None` for a session that never saved any.
    fn get_session_settings(&self, key: &SessionKey) -> RepositoryResult<Option<SessionSettings>>;
}

pub trait SessionWriter {
    fn save_session_settings(
        &self,
        key: &SessionKey,
        settings: &SessionSettings,
    ) -> RepositoryResult<SessionSettings>;
}

pub trait LeadSetReader {
    /// Returns the last lead set. Malformed stored data reads as `None`.
    fn get_lead_set(&self, key: &SessionKey) -> RepositoryResult<Option<LeadSet>>;
}

pub trait LeadSetWriter {
    /// Atomically replaces any previous lead set of the session.
    fn replace_lead_set(&self, key: &SessionKey, lead_set: &LeadSet) -> RepositoryResult<()>;
    /// Removes the stored lead set, returning the number of deleted rows.
    fn clear_lead_set(&self, key: &SessionKey) -> RepositoryResult<usize>;
}
