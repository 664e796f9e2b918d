//! Hand-written port doubles shared by the service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use rota_core::calendar::Week;
use rota_core::participant::Roster;
use rota_core::rotation::RotationState;
use rota_core::settings::{NotificationTarget, Settings};
use rota_ports::error::{NotifyError, PortError};
use rota_ports::outbound::{Clock, Notifier, SettingsRepository};
use rota_ports::types::BotIdentity;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn settings_with(names: &[&str], anchor_week: u32, configured: bool) -> Settings {
    let target = if configured {
        NotificationTarget::new("123:token", "-1001")
    } else {
        NotificationTarget::default()
    };
    Settings {
        rotation: RotationState::new(
            Roster::from_names(names.iter().copied()),
            Week::new(anchor_week, 2025),
        ),
        target,
        ..Settings::default()
    }
}

#[derive(Default)]
pub struct MockSettingsRepo {
    settings: Mutex<Settings>,
    saves: Mutex<usize>,
    fail_loads: Mutex<bool>,
}

impl MockSettingsRepo {
    pub fn with(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(settings),
            ..Self::default()
        }
    }

    pub fn current(&self) -> Settings {
        self.settings.lock().unwrap().clone()
    }

    pub fn saves(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn fail_loads(&self) {
        *self.fail_loads.lock().unwrap() = true;
    }
}

#[async_trait]
impl SettingsRepository for MockSettingsRepo {
    async fn load(&self) -> Result<Settings, PortError> {
        if *self.fail_loads.lock().unwrap() {
            return Err(PortError::Persistence("unreadable".into()));
        }
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save(&self, settings: &Settings) -> Result<(), PortError> {
        *self.settings.lock().unwrap() = settings.clone();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<String>>,
    verified: Mutex<Vec<String>>,
    fail: Mutex<bool>,
}

impl MockNotifier {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn verified_tokens(&self) -> Vec<String> {
        self.verified.lock().unwrap().clone()
    }

    pub fn fail_sends(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, _target: &NotificationTarget, text: &str) -> Result<(), NotifyError> {
        if *self.fail.lock().unwrap() {
            return Err(NotifyError::DeliveryFailed("connection reset".into()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn verify(&self, target: &NotificationTarget) -> Result<BotIdentity, NotifyError> {
        self.verified.lock().unwrap().push(target.bot_token.clone());
        Ok(BotIdentity {
            username: Some("rota_bot".into()),
            first_name: "Rota".into(),
        })
    }
}

pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Clock whose time tests can move.
pub struct ManualClock(pub Mutex<NaiveDateTime>);

impl ManualClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(Mutex::new(at))
    }

    pub fn set(&self, at: NaiveDateTime) {
        *self.0.lock().unwrap() = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.0.lock().unwrap()
    }
}
