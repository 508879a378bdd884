use thiserror::Error;

pub type BkResult<T> = Result<T, BkError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BkError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Out of range: {what} = {value}")]
    OutOfRange { what: &'static str, value: f64 },
}
