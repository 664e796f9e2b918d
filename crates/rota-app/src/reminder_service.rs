use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use rota_core::message;
use rota_core::reminder::{next_week_reminder, Decision, ReminderGate};
use rota_ports::outbound::{Clock, Notifier, SettingsRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoParticipants,
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A reminder already went out today.
    Suppressed,
    Waiting,
    Skipped(SkipReason),
    Sent { driver: String },
    SendFailed { driver: String },
    LoadFailed,
}

/// Polls the settings once per tick and sends next week's driver reminder
/// when the configured weekday and minute come around.
pub struct ReminderService<S, N, C>
where
    S: SettingsRepository,
    N: Notifier,
    C: Clock,
{
    store: S,
    notifier: N,
    clock: C,
    gate: Mutex<ReminderGate>,
}

impl<S, N, C> ReminderService<S, N, C>
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
            gate: Mutex::new(ReminderGate::new()),
        }
    }

    /// One scheduler step. Never fails; problems are logged and reported in
    /// the outcome.
    pub async fn tick(&self) -> TickOutcome {
        let now = self.clock.now();
        let settings = match self.store.load().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!(error = %e, "reminder tick could not load settings");
                return TickOutcome::LoadFailed;
            }
        };

        let mut gate = self.gate.lock().await;
        match gate.evaluate(&settings.reminder, now) {
            Decision::Suppressed => return TickOutcome::Suppressed,
            Decision::Waiting => return TickOutcome::Waiting,
            Decision::Due => {}
        }

        let Some(due) = next_week_reminder(&settings.rotation, now.date()) else {
            tracing::info!("reminder due but no participants configured, skipping");
            return TickOutcome::Skipped(SkipReason::NoParticipants);
        };
        if !settings.target.is_configured() {
            tracing::info!("reminder due but notifications are not configured, skipping");
            return TickOutcome::Skipped(SkipReason::NotConfigured);
        }

        let text = message::weekly_reminder(&due);
        let result = self.notifier.send(&settings.target, &text).await;
        gate.mark_fired(now.date());

        match result {
            Ok(()) => {
                tracing::info!(driver = %due.driver, week = %due.week, "weekly reminder sent");
                TickOutcome::Sent { driver: due.driver }
            }
            Err(e) => {
                tracing::warn!(
                    driver = %due.driver,
                    error = %e,
                    "weekly reminder not delivered"
                );
                TickOutcome::SendFailed { driver: due.driver }
            }
        }
    }

    /// Ticks every `period` until `shutdown` turns true or its sender is
    /// dropped. Ticks never overlap: each one completes before the next
    /// interval is awaited.
    pub async fn run(&self, period: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(period_secs = period.as_secs(), "reminder scheduler started");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let outcome = self.tick().await;
                    tracing::debug!(?outcome, "reminder tick");
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("reminder scheduler stopped");
    }
}

impl<S, N, C> ReminderService<S, N, C>
where
    S: SettingsRepository + 'static,
    N: Notifier + 'static,
    C: Clock + 'static,
{
    pub fn spawn(self: Arc<Self>, period: Duration, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(period, shutdown).await })
    }
}
