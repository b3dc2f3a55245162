use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("entity {0} is already attached to the scheduler")]
    AlreadyAttached(String),
}

pub type SimResult<T> = Result<T, SimError>;
