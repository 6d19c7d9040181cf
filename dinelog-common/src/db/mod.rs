//! Visit store backed by SQLite

pub mod init;
pub mod visits;

pub use init::init_database;
pub use visits::{append, list_all};
