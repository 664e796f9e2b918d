use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use rota_core::settings::{NotificationTarget, Settings};

use crate::error::{NotifyError, PortError};
use crate::types::BotIdentity;

/// Whole-document store for the single settings record.
///
/// Known race: writes are plain read-modify-write with no locking, so an API
/// save racing a reminder tick is last-writer-wins.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns the stored document, or the defaults when nothing is stored yet.
    async fn load(&self) -> Result<Settings, PortError>;
    async fn save(&self, settings: &Settings) -> Result<(), PortError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, target: &NotificationTarget, text: &str) -> Result<(), NotifyError>;
    async fn verify(&self, target: &NotificationTarget) -> Result<BotIdentity, NotifyError>;
}

/// Host-local wall clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[async_trait]
impl<T: SettingsRepository + ?Sized> SettingsRepository for Arc<T> {
    async fn load(&self) -> Result<Settings, PortError> {
        (**self).load().await
    }

    async fn save(&self, settings: &Settings) -> Result<(), PortError> {
        (**self).save(settings).await
    }
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    async fn send(&self, target: &NotificationTarget, text: &str) -> Result<(), NotifyError> {
        (**self).send(target, text).await
    }

    async fn verify(&self, target: &NotificationTarget) -> Result<BotIdentity, NotifyError> {
        (**self).verify(target).await
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
