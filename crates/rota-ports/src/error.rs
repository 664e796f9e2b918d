use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("connection error: {0}")]
    Connection(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifications are not configured")]
    NotConfigured,
    #[error("request timed out")]
    Timeout,
    #[error("rejected by messaging api: {0}")]
    Rejected(String),
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}
