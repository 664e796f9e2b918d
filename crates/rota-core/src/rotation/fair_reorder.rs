//! Manual driver override.
//!
//! The chosen participant moves to the front, the person who made the change
//! goes right after them, and everyone else keeps their relative order. The
//! anchor is then reset to the current week so the new front of the roster
//! is on duty immediately.

use chrono::NaiveDateTime;

use crate::calendar::Week;
use crate::error::DomainError;
use crate::events::DriverChanged;
use crate::participant::{Participant, Roster};

use super::RotationState;

impl RotationState {
    pub fn apply_override(
        &mut self,
        new_driver_index: usize,
        changer_name: Option<&str>,
        now: Week,
        occurred_at: NaiveDateTime,
    ) -> Result<DriverChanged, DomainError> {
        let current = self.on_duty(now).ok_or(DomainError::NoParticipants)?;
        let current_index = current.index;
        let current_driver = current.participant.clone();

        let new_driver = self
            .users
            .get(new_driver_index)
            .cloned()
            .ok_or(DomainError::InvalidSelection {
                index: new_driver_index,
                len: self.users.len(),
            })?;

        if new_driver_index == current_index {
            return Err(DomainError::AlreadyOnDuty(new_driver.name));
        }

        let changer = changer_name
            .and_then(|name| self.users.find(name))
            .cloned()
            .unwrap_or_else(|| current_driver.clone());

        let order = fair_order(&self.users, &new_driver, &changer);

        self.users = order;
        self.rotation_start_week = now.number;
        self.rotation_start_year = now.year;

        Ok(DriverChanged {
            changed_by: changer.name,
            previous_driver: current_driver.name,
            new_driver: new_driver.name,
            order: self.users.names(),
            week: now,
            occurred_at,
        })
    }
}

fn fair_order(roster: &Roster, new_driver: &Participant, changer: &Participant) -> Roster {
    let mut order = Vec::with_capacity(roster.len());
    order.push(new_driver.clone());
    if changer.name != new_driver.name {
        order.push(changer.clone());
    }
    for p in roster {
        if !order.iter().any(|placed| placed.name == p.name) {
            order.push(p.clone());
        }
    }
    Roster::new(order)
}
