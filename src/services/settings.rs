//! Services managing per-session preferences.

use validator::Validate;

use crate::domain::session::SessionSettings;
use crate::domain::types::SessionKey;
use crate::forms::main::SettingsForm;
use crate::repository::SessionWriter;
use crate::services::{ServiceError, ServiceResult};

/// Stores the API key and messaging template of the session.
pub fn save_settings<R>(repo: &R, key: &SessionKey, form: SettingsForm) -> ServiceResult<SessionSettings>
where
    R: SessionWriter + ?Sized,
{
    if let Err(err) = form.validate() {
        log::error!("Failed to validate settings form: {err}");
        return Err(ServiceError::Form("Settings are too long".to_string()));
    }

    let settings = SessionSettings::from(form);

    let saved = repo.save_session_settings(key, &settings).map_err(|err| {
        log::error!("Failed to save session settings: {err}");
        err
    })?;

    Ok(saved)
}
