use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No ids left to issue after {0}")]
    IdsExhausted(u64),

    #[error("Duplicate to-do id {0}")]
    DuplicateTodoId(u64),
}

pub type DomainResult<T> = Result<T, DomainError>;
