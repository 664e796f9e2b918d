pub mod fair_reorder;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{Week, WeekRange};
use crate::error::DomainError;
use crate::participant::{Participant, Roster};

/// Weeks per year used when the target lies in a later year than the anchor.
pub const WEEKS_PER_YEAR: i64 = 52;

/// Accepted range for the anchor year.
pub const START_YEARS: std::ops::RangeInclusive<i32> = 1970..=9999;

/// The participant on duty for a given week and their roster position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnDuty<'a> {
    pub participant: &'a Participant,
    pub index: usize,
}

/// Who is on duty in `target`, counting from `anchor` where `roster[0]` is.
///
/// Returns `None` for an empty roster. Year gaps count as 52 weeks each, so
/// rotations spanning 53-week ISO years drift by one slot.
pub fn current_driver<'a>(roster: &'a Roster, anchor: Week, target: Week) -> Option<OnDuty<'a>> {
    if roster.is_empty() {
        return None;
    }
    let len = roster.len() as i64;

    let mut effective = target.number as i64 - anchor.number as i64;
    if target.year > anchor.year {
        effective += (target.year as i64 - anchor.year as i64) * WEEKS_PER_YEAR;
    }
    let index = effective.rem_euclid(len) as usize;

    roster.get(index).map(|participant| OnDuty { participant, index })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationState {
    #[serde(default)]
    pub users: Roster,
    #[serde(default = "default_start_week")]
    pub rotation_start_week: u32,
    #[serde(default = "default_start_year")]
    pub rotation_start_year: i32,
}

fn default_start_week() -> u32 {
    1
}

fn default_start_year() -> i32 {
    2025
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            users: Roster::default(),
            rotation_start_week: default_start_week(),
            rotation_start_year: default_start_year(),
        }
    }
}

/// One row of a rotation preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledWeek {
    pub week: Week,
    pub range: WeekRange,
    pub participant: Participant,
    pub index: usize,
}

impl RotationState {
    pub fn new(users: Roster, anchor: Week) -> Self {
        Self {
            users,
            rotation_start_week: anchor.number,
            rotation_start_year: anchor.year,
        }
    }

    pub fn anchor(&self) -> Week {
        Week::new(self.rotation_start_week, self.rotation_start_year)
    }

    pub fn on_duty(&self, target: Week) -> Option<OnDuty<'_>> {
        current_driver(&self.users, self.anchor(), target)
    }

    /// On-duty participants for `weeks` consecutive weeks starting with the
    /// week that contains `from`.
    pub fn upcoming(&self, from: NaiveDate, weeks: usize) -> Vec<ScheduledWeek> {
        (0..weeks)
            .filter_map(|i| {
                let date = from + Duration::weeks(i as i64);
                let week = Week::containing(date);
                self.on_duty(week).map(|duty| ScheduledWeek {
                    week,
                    range: week.date_range(),
                    participant: duty.participant.clone(),
                    index: duty.index,
                })
            })
            .collect()
    }

    /// Normalizes names and checks the anchor week and year.
    pub fn validated(&self) -> Result<Self, DomainError> {
        if !(1..=53).contains(&self.rotation_start_week) {
            return Err(DomainError::InvalidWeek(self.rotation_start_week));
        }
        if !START_YEARS.contains(&self.rotation_start_year) {
            return Err(DomainError::InvalidYear(self.rotation_start_year));
        }
        Ok(Self {
            users: self.users.normalized()?,
            rotation_start_week: self.rotation_start_week,
            rotation_start_year: self.rotation_start_year,
        })
    }
}
