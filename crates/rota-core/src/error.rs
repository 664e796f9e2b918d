use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("no participants in the rotation")]
    NoParticipants,
    #[error("invalid selection: index {index} is outside a roster of {len}")]
    InvalidSelection { index: usize, len: usize },
    #[error("{0} is already on duty this week")]
    AlreadyOnDuty(String),
    #[error("participant name must not be empty")]
    EmptyParticipantName,
    #[error("duplicate participant: {0}")]
    DuplicateParticipant(String),
    #[error("invalid reminder time: day {day}, {hour:02}:{minute:02}")]
    InvalidReminderTime { day: u8, hour: u8, minute: u8 },
    #[error("invalid week number: {0}")]
    InvalidWeek(u32),
    #[error("invalid rotation start year: {0}")]
    InvalidYear(i32),
}
