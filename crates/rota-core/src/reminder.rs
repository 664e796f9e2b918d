use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::calendar::Week;
use crate::error::DomainError;
use crate::events::ReminderDue;
use crate::rotation::RotationState;

/// When the weekly reminder goes out. `day` counts from Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(rename = "reminderDay", default = "default_day")]
    pub day: u8,
    #[serde(rename = "reminderHour", default = "default_hour")]
    pub hour: u8,
    #[serde(rename = "reminderMinute", default)]
    pub minute: u8,
}

fn default_day() -> u8 {
    5
}

fn default_hour() -> u8 {
    18
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            day: default_day(),
            hour: default_hour(),
            minute: 0,
        }
    }
}

impl ReminderConfig {
    pub fn validated(self) -> Result<Self, DomainError> {
        if self.day > 6 || self.hour > 23 || self.minute > 59 {
            return Err(DomainError::InvalidReminderTime {
                day: self.day,
                hour: self.hour,
                minute: self.minute,
            });
        }
        Ok(self)
    }

    /// Exact match on weekday, hour and minute.
    pub fn matches(&self, at: NaiveDateTime) -> bool {
        at.weekday().num_days_from_sunday() == self.day as u32
            && at.hour() == self.hour as u32
            && at.minute() == self.minute as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    FiredToday(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Already sent today.
    Suppressed,
    /// Trigger time not reached.
    Waiting,
    Due,
}

/// At-most-once-per-day latch for the reminder. Lives in memory only.
#[derive(Debug, Clone, Copy)]
pub struct ReminderGate {
    state: GateState,
}

impl Default for ReminderGate {
    fn default() -> Self {
        Self {
            state: GateState::Idle,
        }
    }
}

impl ReminderGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn evaluate(&self, config: &ReminderConfig, now: NaiveDateTime) -> Decision {
        if self.state == GateState::FiredToday(now.date()) {
            return Decision::Suppressed;
        }
        if config.matches(now) {
            Decision::Due
        } else {
            Decision::Waiting
        }
    }

    pub fn mark_fired(&mut self, today: NaiveDate) {
        self.state = GateState::FiredToday(today);
    }
}

/// The reminder for the week after `today`: week number plus one in the
/// same calendar year.
pub fn next_week_reminder(rotation: &RotationState, today: NaiveDate) -> Option<ReminderDue> {
    let week = Week::containing(today).next();
    let duty = rotation.on_duty(week)?;
    Some(ReminderDue {
        week,
        range: week.date_range(),
        driver: duty.participant.name.clone(),
        fired_on: today,
    })
}
