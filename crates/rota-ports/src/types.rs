use serde::{Deserialize, Serialize};

use rota_core::calendar::{Week, WeekRange};
use rota_core::participant::Participant;

/// Bot account behind a token, as reported by the messaging API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotIdentity {
    pub username: Option<String>,
    pub first_name: String,
}

impl BotIdentity {
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(username) => format!("@{username}"),
            None => self.first_name.clone(),
        }
    }
}

/// This week's driver as shown to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentDriver {
    pub week: Week,
    pub range: WeekRange,
    pub range_label: String,
    /// `None` when the roster is empty.
    pub driver: Option<Participant>,
    pub index: Option<usize>,
}

/// Manual driver change as requested by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverChangeRequest {
    pub new_driver_index: usize,
    #[serde(default)]
    pub changer_name: Option<String>,
}
