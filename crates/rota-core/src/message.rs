//! Notification texts. Bold uses Telegram Markdown (`*bold*`).

use crate::events::{DriverChanged, ReminderDue};

/// How many upcoming participants a change notice lists.
pub const NEXT_UP_LIMIT: usize = 4;

pub fn driver_changed(ev: &DriverChanged) -> String {
    let mut text = format!(
        "🔄 *Sürücü değişikliği*\n\n*{}* bu haftanın sürücüsünü *{}* yerine *{}* olarak değiştirdi.",
        ev.changed_by, ev.previous_driver, ev.new_driver
    );

    let (next, more) = ev.next_up(NEXT_UP_LIMIT);
    if !next.is_empty() {
        text.push_str("\n\n*Sıradakiler:*");
        for (i, name) in next.iter().enumerate() {
            text.push_str(&format!("\n{}. {}", i + 2, name));
        }
        if more > 0 {
            text.push_str(&format!("\n_+{more} kişi daha_"));
        }
    }
    text
}

pub fn weekly_reminder(due: &ReminderDue) -> String {
    format!(
        "🚗 *Haftalık sürücü hatırlatması*\n\n📅 {}\n👤 Gelecek haftanın sürücüsü: *{}*",
        due.range, due.driver
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Week;
    use chrono::NaiveDate;

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
    fn change_notice_lists_next_participants() {
        let text = driver_changed(&changed(&["C", "B", "A"]));
        assert!(text.contains("*B* bu haftanın sürücüsünü *A* yerine *C*"));
        assert!(text.contains("\n2. B\n3. A"));
        assert!(!text.contains("kişi daha"));
    }

    #[test]
    fn change_notice_caps_list_and_counts_rest() {
        let text = driver_changed(&changed(&["C", "B", "A", "D", "E", "F", "G"]));
        assert!(text.contains("\n5. E"));
        assert!(!text.contains("6. F"));
        assert!(text.ends_with("_+2 kişi daha_"));
    }

    #[test]
    fn change_notice_for_single_participant_has_no_list() {
        let text = driver_changed(&changed(&["C"]));
        assert!(!text.contains("Sıradakiler"));
    }

    #[test]
    fn reminder_has_range_and_driver() {
        let week = Week::new(12, 2025);
        let due = ReminderDue {
            week,
            range: week.date_range(),
            driver: "B".into(),
            fired_on: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        };
        let text = weekly_reminder(&due);
        assert!(text.contains("17 Mart 2025 - 23 Mart 2025"));
        assert!(text.contains("*B*"));
    }
}
