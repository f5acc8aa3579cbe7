//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::lead_set::LeadSet;
use crate::domain::session::SessionSettings;
use crate::domain::types::SessionKey;
use crate::repository::errors::RepositoryResult;
use crate::repository::{LeadSetReader, LeadSetWriter, SessionReader, SessionWriter};

mock! {
    pub Repository {}

    impl SessionReader for Repository {
        fn get_session_settings(&self, key: &SessionKey) -> RepositoryResult<Option<SessionSettings>>;
    }

    impl SessionWriter for Repository {
        fn save_session_settings(
            &self,
            key: &SessionKey,
            settings: &SessionSettings,
        ) -> RepositoryResult<SessionSettings>;
    }

    impl LeadSetReader for Repository {
        fn get_lead_set(&self, key: &SessionKey) -> RepositoryResult<Option<LeadSet>>;
    }

    impl LeadSetWriter for Repository {
        fn replace_lead_set(&self, key: &SessionKey, lead_set: &LeadSet) -> RepositoryResult<()>;
        fn clear_lead_set(&self, key: &SessionKey) -> RepositoryResult<usize>;
    }
}
