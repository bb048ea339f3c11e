pub mod command;
pub mod render;

pub use command::{build_cli, dispatch, Outcome};
