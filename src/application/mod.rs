pub mod error;
pub mod project_store;
pub mod snapshot;

pub use error::*;
pub use project_store::*;
pub use snapshot::*;
