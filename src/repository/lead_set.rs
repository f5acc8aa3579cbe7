use diesel::prelude::*;

use crate::{
    domain::{lead_set::LeadSet, types::SessionKey},
    models::lead_set::{LeadSet as DbLeadSet, NewLeadSet},
    repository::{
        DieselRepository, LeadSetReader, LeadSetWriter,
        errors::{RepositoryError, RepositoryResult},
        session::ensure_session,
    },
    schema::lead_sets,
};

impl LeadSetReader for DieselRepository {
    fn get_lead_set(&self, key: &SessionKey) -> RepositoryResult<Option<LeadSet>> {
        let mut conn = self.conn()?;

        let row = lead_sets::table
            .find(key.to_string())
            .select(DbLeadSet::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        match LeadSet::try_from(row) {
            Ok(lead_set) => Ok(Some(lead_set)),
            Err(err) => {
                log::warn!("Discarding malformed lead set of session {key}: {err}");
                Ok(None)
            }
        }
    }
}

impl LeadSetWriter for DieselRepository {
    fn replace_lead_set(&self, key: &SessionKey, lead_set: &LeadSet) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let key = key.to_string();
        let insertable = NewLeadSet::from_domain(&key, lead_set)
            .map_err(|e| RepositoryError::ValidationError(format!("Serialization error: {e}")))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            ensure_session(conn, &key)?;
            diesel::delete(lead_sets::table.find(key.as_str())).execute(conn)?;
            diesel::insert_into(lead_sets::table)
                .values(&insertable)
                .execute(conn)
        })?;

        Ok(())
    }

    fn clear_lead_set(&self, key: &SessionKey) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(lead_sets::table.find(key.to_string())).execute(&mut conn)?;

        Ok(deleted)
    }
}
