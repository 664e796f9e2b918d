use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::reminder::ReminderConfig;
use crate::rotation::RotationState;

/// Bot credentials. Blank values mean notifications are off.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTarget {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
}

impl NotificationTarget {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.bot_token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }

    pub fn has_token(&self) -> bool {
        !self.bot_token.trim().is_empty()
    }
}

impl fmt::Debug for NotificationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.bot_token.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("NotificationTarget")
            .field("bot_token", &token)
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// The single persisted settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub rotation: RotationState,
    #[serde(flatten)]
    pub reminder: ReminderConfig,
    #[serde(flatten)]
    pub target: NotificationTarget,
}

impl Settings {
    pub fn validated(&self) -> Result<Self, DomainError> {
        Ok(Self {
            rotation: self.rotation.validated()?,
            reminder: self.reminder.validated()?,
            target: NotificationTarget::new(self.target.bot_token.trim(), self.target.chat_id.trim()),
        })
    }
}
