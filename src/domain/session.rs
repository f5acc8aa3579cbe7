use serde::{Deserialize, Serialize};

use crate::domain::types::{ApiKey, MessageTemplate};

/// Per-browser preferences kept between visits.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionSettings {
    pub api_key: Option<ApiKey>,
    pub message_template: MessageTemplate,
}

impl SessionSettings {
    #[must_use]
    pub fn new(api_key: Option<ApiKey>, message_template: MessageTemplate) -> Self {
        Self {
            api_key,
            message_template,
        }
    }

    /// Returns a copy with the API key replaced, keeping the template.
    #[must_use]
    pub fn with_api_key(&self, api_key: ApiKey) -> Self {
        Self {
            api_key: Some(api_key),
            message_template: self.message_template.clone(),
        }
    }
}
