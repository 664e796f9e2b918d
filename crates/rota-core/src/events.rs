use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::calendar::{Week, WeekRange};

/// Outcome of a manual override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverChanged {
    pub changed_by: String,
    pub previous_driver: String,
    pub new_driver: String,
    /// Full roster order after the change, new driver first.
    pub order: Vec<String>,
    pub week: Week,
    pub occurred_at: NaiveDateTime,
}

impl DriverChanged {
    /// Participants after the new driver, capped at `limit`, plus how many
    /// were left out.
    pub fn next_up(&self, limit: usize) -> (&[String], usize) {
        let rest = self.order.get(1..).unwrap_or_default();
        let shown = rest.len().min(limit);
        (&rest[..shown], rest.len() - shown)
    }
}

/// A weekly reminder ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDue {
    pub week: Week,
    pub range: WeekRange,
    pub driver: String,
    pub fired_on: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed(order: &[&str]) -> DriverChanged {
        DriverChanged {
            changed_by: "B".into(),
            previous_driver: "A".into(),
            new_driver: order[0].into(),
            order: order.iter().map(|s| s.to_string()).collect(),
            week: Week::new(11, 2025),
            occurred_at: NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn next_up_skips_new_driver() {
        let ev = changed(&["C", "B", "A"]);
        let (shown, more) = ev.next_up(4);
        assert_eq!(shown, ["B", "A"]);
        assert_eq!(more, 0);
    }

    #[test]
    fn next_up_counts_remainder() {
        let ev = changed(&["C", "B", "A", "D", "E", "F", "G"]);
        let (shown, more) = ev.next_up(4);
        assert_eq!(shown, ["B", "A", "D", "E"]);
        assert_eq!(more, 2);
    }
}
