//! Projects and their to-dos held in memory and written back, as one JSON
//! snapshot, to a named storage slot after every change.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use application::{AppError, AppResult, ProjectStore, DEFAULT_STORAGE_KEY};
pub use domain::{DomainError, Project, ProjectId, ProjectUpdate, Todo, TodoId, TodoUpdate};
