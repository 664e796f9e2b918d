pub mod calendar;
pub mod error;
pub mod events;
pub mod message;
pub mod participant;
pub mod reminder;
pub mod rotation;
pub mod settings;
