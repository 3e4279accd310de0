pub mod forms;
pub mod validation;
pub mod calendar;
pub mod payment;
pub mod scheduling;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
