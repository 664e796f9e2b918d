pub mod error;
pub mod reminder_service;
pub mod rotation_service;

#[cfg(test)]
mod testing;
