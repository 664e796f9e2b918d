use async_trait::async_trait;

use rota_core::events::DriverChanged;
use rota_core::rotation::ScheduledWeek;
use rota_core::settings::{NotificationTarget, Settings};

use crate::types::{BotIdentity, CurrentDriver, DriverChangeRequest};

/// Operations exposed to the HTTP layer.
#[async_trait]
pub trait RotationManager: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn settings(&self) -> Result<Settings, Self::Error>;
    async fn save_settings(&self, settings: Settings) -> Result<Settings, Self::Error>;
    async fn current_driver(&self) -> Result<CurrentDriver, Self::Error>;
    async fn schedule(&self, weeks: usize) -> Result<Vec<ScheduledWeek>, Self::Error>;
    async fn change_driver(&self, request: DriverChangeRequest)
        -> Result<DriverChanged, Self::Error>;
    async fn send_message(&self, text: &str) -> Result<(), Self::Error>;
    async fn verify_bot(
        &self,
        target: Option<NotificationTarget>,
    ) -> Result<BotIdentity, Self::Error>;
}
