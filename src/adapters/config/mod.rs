pub mod file_store;

pub use file_store::{FileConfigStore, DATA_DIR_ENV};
