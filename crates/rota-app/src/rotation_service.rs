use async_trait::async_trait;

use rota_core::calendar::Week;
use rota_core::events::DriverChanged;
use rota_core::message;
use rota_core::rotation::ScheduledWeek;
use rota_core::settings::{NotificationTarget, Settings};
use rota_ports::error::NotifyError;
use rota_ports::inbound::RotationManager;
use rota_ports::outbound::{Clock, Notifier, SettingsRepository};
use rota_ports::types::{BotIdentity, CurrentDriver, DriverChangeRequest};

use crate::error::AppError;

pub const MAX_SCHEDULE_WEEKS: usize = 52;

pub struct RotationService<S, N, C>
where
    S: SettingsRepository,
    N: Notifier,
    C: Clock,
{
    store: S,
    notifier: N,
    clock: C,
}

impl<S, N, C> RotationService<S, N, C>
where
    S: SettingsRepository,
    N: Notifier,
    C: Clock,
{
    pub fn new(store: S, notifier: N, clock: C) -> Self {
        Self {
            store,
            notifier,
            clock,
        }
    }

    pub async fn settings(&self) -> Result<Settings, AppError> {
        Ok(self.store.load().await?)
    }

    /// Validates and replaces the whole settings document.
    pub async fn save_settings(&self, settings: Settings) -> Result<Settings, AppError> {
        let settings = settings.validated()?;
        self.store.save(&settings).await?;
        tracing::info!(
            participants = settings.rotation.users.len(),
            anchor = %settings.rotation.anchor(),
            "settings saved"
        );
        Ok(settings)
    }

    pub async fn current_driver(&self) -> Result<CurrentDriver, AppError> {
        let settings = self.store.load().await?;
        let week = Week::containing(self.clock.now().date());
        let range = week.date_range();
        let duty = settings.rotation.on_duty(week);

        Ok(CurrentDriver {
            week,
            range,
            range_label: range.to_string(),
            driver: duty.map(|d| d.participant.clone()),
            index: duty.map(|d| d.index),
        })
    }

    pub async fn schedule(&self, weeks: usize) -> Result<Vec<ScheduledWeek>, AppError> {
        if weeks == 0 || weeks > MAX_SCHEDULE_WEEKS {
            return Err(AppError::Validation(format!(
                "weeks must be between 1 and {MAX_SCHEDULE_WEEKS}"
            )));
        }
        let settings = self.store.load().await?;
        Ok(settings.rotation.upcoming(self.clock.now().date(), weeks))
    }

    /// Applies a manual override at the current week and persists it. The
    /// change notice is best-effort and never undoes the override.
    pub async fn change_driver(
        &self,
        new_driver_index: usize,
        changer_name: Option<&str>,
    ) -> Result<DriverChanged, AppError> {
        let mut settings = self.store.load().await?;
        let now = self.clock.now();
        let week = Week::containing(now.date());

        let changed =
            settings
                .rotation
                .apply_override(new_driver_index, changer_name, week, now)?;
        self.store.save(&settings).await?;

        tracing::info!(
            changed_by = %changed.changed_by,
            from = %changed.previous_driver,
            to = %changed.new_driver,
            week = %week,
            "driver changed"
        );

        if settings.target.is_configured() {
            let text = message::driver_changed(&changed);
            if let Err(e) = self.notifier.send(&settings.target, &text).await {
                tracing::warn!(error = %e, "driver change notice not delivered");
            }
        } else {
            tracing::debug!("notifications not configured, change notice skipped");
        }

        Ok(changed)
    }

    pub async fn send_message(&self, text: &str) -> Result<(), AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("message must not be empty".into()));
        }
        let settings = self.store.load().await?;
        if !settings.target.is_configured() {
            return Err(NotifyError::NotConfigured.into());
        }
        self.notifier.send(&settings.target, text).await?;
        tracing::info!(chars = text.chars().count(), "message sent");
        Ok(())
    }

    /// Checks the bot token. Uses `target` when it carries a token, the
    /// stored credentials otherwise.
    pub async fn verify_bot(
        &self,
        target: Option<NotificationTarget>,
    ) -> Result<BotIdentity, AppError> {
        let target = match target {
            Some(t) if t.has_token() => t,
            _ => self.store.load().await?.target,
        };
        if !target.has_token() {
            return Err(NotifyError::NotConfigured.into());
        }
        let bot = self.notifier.verify(&target).await?;
        tracing::info!(bot = %bot.display_name(), "bot verified");
        Ok(bot)
    }
}

#[async_trait]
impl<S, N, C> RotationManager for RotationService<S, N, C>
where
    S: SettingsRepository,
    N: Notifier,
    C: Clock,
{
    type Error = AppError;

    async fn settings(&self) -> Result<Settings, AppError> {
        RotationService::settings(self).await
    }

    async fn save_settings(&self, settings: Settings) -> Result<Settings, AppError> {
        RotationService::save_settings(self, settings).await
    }

    async fn current_driver(&self) -> Result<CurrentDriver, AppError> {
        RotationService::current_driver(self).await
    }

    async fn schedule(&self, weeks: usize) -> Result<Vec<ScheduledWeek>, AppError> {
        RotationService::schedule(self, weeks).await
    }

    async fn change_driver(&self, request: DriverChangeRequest) -> Result<DriverChanged, AppError> {
        RotationService::change_driver(
            self,
            request.new_driver_index,
            request.changer_name.as_deref(),
        )
        .await
    }

    async fn send_message(&self, text: &str) -> Result<(), AppError> {
        RotationService::send_message(self, text).await
    }

    async fn verify_bot(
        &self,
        target: Option<NotificationTarget>,
    ) -> Result<BotIdentity, AppError> {
        RotationService::verify_bot(self, target).await
    }
}
