use serde::Deserialize;
use validator::Validate;

use crate::domain::session::SessionSettings;
use crate::domain::types::{ApiKey, Keyword, MessageTemplate};
use crate::dto::regions::RegionSelection;
use crate::forms::FormError;

/// Search submission: keyword plus the region ids picked in the selectors.
///
/// The API key may be left blank when one is already stored for the session.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchForm {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub keyword: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub province: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub regency: String,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
}

/// Validated search input.
#[derive(Debug)]
pub struct SearchPayload {
    pub api_key: Option<ApiKey>,
    pub keyword: Keyword,
    pub selection: RegionSelection,
}

impl TryFrom<SearchForm> for SearchPayload {
    type Error = FormError;

    fn try_from(form: SearchForm) -> Result<Self, Self::Error> {
        let keyword = Keyword::new(form.keyword).map_err(|_| FormError::MissingKeyword)?;
        let selection = RegionSelection::new(
            Some(form.province),
            Some(form.regency),
            form.district,
            form.village,
        );
        if selection.regency.is_none() {
            return Err(FormError::MissingLocation);
        }

        Ok(Self {
            api_key: ApiKey::new(form.api_key).ok(),
            keyword,
            selection,
        })
    }
}

/// Per-session preferences edited in the settings panel.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SettingsForm {
    #[serde(default)]
    #[validate(length(max = 256))]
    pub api_key: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub message_template: String,
}

impl From<SettingsForm> for SessionSettings {
    /// A blank key clears the stored one; a blank template restores the default.
    fn from(form: SettingsForm) -> Self {
        SessionSettings::new(
            ApiKey::new(form.api_key).ok(),
            MessageTemplate::or_default(Some(form.message_template.as_str())),
        )
    }
}
