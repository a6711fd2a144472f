use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FieldError {
    #[error("Zero has no multiplicative inverse")]
    InvZeroError,
}
