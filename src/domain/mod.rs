pub mod error;
pub mod project;
pub mod todo;

pub use error::*;
pub use project::*;
pub use todo::*;
