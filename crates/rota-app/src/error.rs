use rota_core::error::DomainError;
use rota_ports::error::{NotifyError, PortError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),
    #[error("port error: {0}")]
    Port(#[from] PortError),
    #[error("notification error: {0}")]
    Notify(#[from] NotifyError),
    #[error("{0}")]
    Validation(String),
}

/// Coarse classification callers use to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Persistence,
    Gateway,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::Validation(_) => ErrorKind::Validation,
            Self::Notify(NotifyError::NotConfigured) => ErrorKind::Validation,
            Self::Port(_) => ErrorKind::Persistence,
            Self::Notify(_) => ErrorKind::Gateway,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_error_source() {
        assert_eq!(
            AppError::from(DomainError::NoParticipants).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            AppError::from(PortError::Persistence("disk".into())).kind(),
            ErrorKind::Persistence
        );
        assert_eq!(
            AppError::from(NotifyError::Timeout).kind(),
            ErrorKind::Gateway
        );
        assert_eq!(
            AppError::from(NotifyError::NotConfigured).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn domain_message_is_passed_through() {
        let err = AppError::from(DomainError::AlreadyOnDuty("A".into()));
        assert_eq!(err.to_string(), "A is already on duty this week");
    }
}
